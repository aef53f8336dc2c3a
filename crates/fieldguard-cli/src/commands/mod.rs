//! Command handlers, one module per command group.

mod check;
mod init;
mod misc;
mod password;
mod protect;
mod sign;
mod token;

use crate::app::AppContext;
use crate::cli::Commands;

pub fn dispatch(ctx: &AppContext) -> anyhow::Result<()> {
    match &ctx.cli().command {
        Commands::Init(args) => init::handle_init(ctx, args),
        Commands::Check => check::handle_check(ctx),
        Commands::Encrypt(args) => protect::handle_encrypt(ctx, args),
        Commands::Decrypt(args) => protect::handle_decrypt(ctx, args),
        Commands::Sign(args) => sign::handle_sign(ctx, args),
        Commands::Verify(args) => sign::handle_verify(ctx, args),
        Commands::HashPassword(args) => password::handle_hash_password(ctx, args),
        Commands::VerifyPassword(args) => password::handle_verify_password(ctx, args),
        Commands::Token(args) => token::handle_token(ctx, args),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}
