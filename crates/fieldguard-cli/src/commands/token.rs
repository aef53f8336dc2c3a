use crate::app::AppContext;
use crate::cli::TokenArgs;

/// Tokens need no master secret, so this skips the service.
pub fn handle_token(ctx: &AppContext, args: &TokenArgs) -> anyhow::Result<()> {
    let token = fieldguard_core::crypto::generate_token(args.bytes, args.encoding)?;

    if ctx.ui().mode.is_json() {
        println!(
            "{}",
            serde_json::json!({ "token": token, "bytes": args.bytes })
        );
    } else {
        println!("{}", token);
    }
    Ok(())
}
