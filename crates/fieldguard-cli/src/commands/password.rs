//! `fieldguard hash-password` and `fieldguard verify-password`.

use fieldguard_core::PUBLIC_FAILURE_MESSAGE;

use crate::app::AppContext;
use crate::cli::{HashPasswordArgs, VerifyPasswordArgs};
use crate::errors::CliError;
use crate::helpers::read_password;
use crate::ui::{badge, Badge, Spinner};

pub fn handle_hash_password(ctx: &AppContext, args: &HashPasswordArgs) -> anyhow::Result<()> {
    let password = read_password(ctx.ui(), args.stdin, true)?;
    let (service, _) = ctx.service()?;

    let spinner = Spinner::new(ctx.ui(), "Hashing password");
    spinner.start();
    let hashed = service.hash_password(&password);
    spinner.clear();
    let hash = hashed?;

    if ctx.ui().mode.is_json() {
        println!("{}", serde_json::json!({ "hash": hash.as_str() }));
    } else {
        println!("{}", hash);
    }
    Ok(())
}

pub fn handle_verify_password(ctx: &AppContext, args: &VerifyPasswordArgs) -> anyhow::Result<()> {
    let password = read_password(ctx.ui(), args.stdin, false)?;
    let (service, _) = ctx.service()?;

    let spinner = Spinner::new(ctx.ui(), "Verifying password");
    spinner.start();
    let verified = service.verify_password(&password, &args.hash);
    spinner.clear();

    if !verified? {
        return Err(CliError::verification_failed(PUBLIC_FAILURE_MESSAGE).into());
    }
    let rehash = service.needs_rehash(&args.hash)?;

    if ctx.ui().mode.is_json() {
        println!(
            "{}",
            serde_json::json!({ "valid": true, "needs_rehash": rehash })
        );
        return Ok(());
    }

    if !ctx.quiet() {
        println!("{}", badge(ctx.ui(), Badge::Ok, "Password matches"));
        if rehash {
            println!(
                "{}",
                badge(
                    ctx.ui(),
                    Badge::Warn,
                    "Hash uses weaker parameters than configured; store a fresh hash"
                )
            );
        }
    }
    Ok(())
}
