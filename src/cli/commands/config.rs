use std::io::Write;

use crate::cli::output::{self, MessageKind, OutputPreferences};
use crate::cli::ConfigCmd;
use crate::config::{Config, ConfigManager};
use crate::errors::CashcastError;

pub fn run(
    cmd: ConfigCmd,
    manager: &ConfigManager,
    json: bool,
    prefs: &OutputPreferences,
    out: &mut dyn Write,
) -> Result<(), CashcastError> {
    let (config, message) = match cmd {
        ConfigCmd::Show => (manager.load()?, None),
        ConfigCmd::SetBuffer { amount } => (
            manager.update(|cfg| cfg.buffer_amount = amount)?,
            Some(format!("Buffer set to {}", output::format_amount(amount))),
        ),
        ConfigCmd::SetMonths { months } => (
            manager.update(|cfg| cfg.forecast_horizon_months = months)?,
            Some(format!("Horizon set to {months} month(s)")),
        ),
        ConfigCmd::SetSnapshot { path } => {
            let message = format!("Default snapshot set to {}", path.display());
            (
                manager.update(|cfg| cfg.default_snapshot = Some(path))?,
                Some(message),
            )
        }
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &config)?;
        writeln!(out)?;
        return Ok(());
    }
    if let Some(message) = message {
        output::print(out, MessageKind::Success, message, prefs)?;
    }
    show(out, manager, &config, prefs)
}

fn show(
    out: &mut dyn Write,
    manager: &ConfigManager,
    config: &Config,
    prefs: &OutputPreferences,
) -> Result<(), CashcastError> {
    output::print(out, MessageKind::Section, "Configuration", prefs)?;
    writeln!(out, "file:            {}", manager.config_path().display())?;
    writeln!(
        out,
        "buffer_amount:   {}",
        output::format_amount(config.buffer_amount)
    )?;
    writeln!(out, "horizon_months:  {}", config.forecast_horizon_months)?;
    writeln!(out, "currency:        {}", config.currency)?;
    writeln!(out, "locale:          {}", config.locale)?;
    writeln!(out, "color:           {}", config.ui_color_enabled)?;
    match &config.default_snapshot {
        Some(path) => writeln!(out, "snapshot:        {}", path.display())?,
        None => writeln!(out, "snapshot:        (none)")?,
    }
    Ok(())
}
