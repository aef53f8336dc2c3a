//! `fieldguard check`: startup validation without touching any data.

use crate::app::AppContext;
use crate::output::{check_json, check_rows};
use crate::ui::receipt;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let (service, source) = ctx.service()?;
    let config_path = ctx.location()?.path.to_string_lossy().to_string();

    if ctx.ui().mode.is_json() {
        println!("{}", check_json(service.config(), &source, &config_path));
        return Ok(());
    }

    if ctx.quiet() {
        return Ok(());
    }

    let rows = check_rows(service.config(), &source, &config_path);
    println!("{}", receipt(ctx.ui(), "Configuration valid", &rows));
    Ok(())
}
