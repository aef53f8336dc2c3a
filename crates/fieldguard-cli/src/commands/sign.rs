//! `fieldguard sign` and `fieldguard verify` with the service signing key.

use crate::app::AppContext;
use crate::cli::{SignArgs, VerifyArgs};
use crate::helpers::read_text;
use crate::ui::{badge, Badge};

pub fn handle_sign(ctx: &AppContext, args: &SignArgs) -> anyhow::Result<()> {
    let message = read_text(args.message.clone(), "message")?;
    let (service, _) = ctx.service()?;
    let signature = service.sign(message.as_bytes())?;

    if ctx.ui().mode.is_json() {
        println!("{}", serde_json::json!({ "signature": signature.to_hex() }));
    } else {
        println!("{}", signature.to_hex());
    }
    Ok(())
}

pub fn handle_verify(ctx: &AppContext, args: &VerifyArgs) -> anyhow::Result<()> {
    let message = read_text(args.message.clone(), "message")?;
    let (service, _) = ctx.service()?;

    // Mismatch surfaces as an integrity error and exits non-zero.
    service.ensure_signature(message.as_bytes(), &args.signature)?;

    if ctx.ui().mode.is_json() {
        println!("{}", serde_json::json!({ "valid": true }));
    } else if !ctx.quiet() {
        println!("{}", badge(ctx.ui(), Badge::Ok, "Signature valid"));
    }
    Ok(())
}
