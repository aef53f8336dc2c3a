//! `fieldguard encrypt` and `fieldguard decrypt`.

use anyhow::Context;

use fieldguard_core::EncryptionBundle;

use crate::app::AppContext;
use crate::cli::{DecryptArgs, EncryptArgs};
use crate::helpers::read_text;
use crate::output::bundle_json;

pub fn handle_encrypt(ctx: &AppContext, args: &EncryptArgs) -> anyhow::Result<()> {
    let plaintext = read_text(args.text.clone(), "text")?;
    let (service, _) = ctx.service()?;

    let bundle = service
        .encrypt_str(&plaintext, args.level)
        .context("Failed to encrypt")?;

    if ctx.ui().mode.is_json() {
        println!("{}", bundle_json(args.level, &bundle));
    } else {
        println!("{}", bundle.to_json()?);
    }
    Ok(())
}

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let input = read_text(args.bundle.clone(), "bundle")?;
    let (service, _) = ctx.service()?;

    let bundle = EncryptionBundle::from_json(input.trim())?;
    let plaintext = service
        .decrypt_to_string(&bundle, args.level)
        .context("Failed to decrypt")?;

    if ctx.ui().mode.is_json() {
        let value = serde_json::json!({
            "level": args.level,
            "plaintext": plaintext,
        });
        println!("{}", value);
    } else {
        println!("{}", plaintext);
    }
    Ok(())
}
