use crate::cli::SettingsCommand;
use crate::error::Result;
use crate::manager::TabGroupManager;
use crate::storage::{Settings, StorageLocation};
use colored::Colorize;

/// Handle settings commands
pub async fn handle_settings(manager: &mut TabGroupManager, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show { json } => {
            let settings = manager.settings();
            if json {
                println!("{}", serde_json::to_string_pretty(settings)?);
            } else {
                print_settings(settings);
            }
        }
        SettingsCommand::Set {
            auto_save_on_close,
            auto_restore_default,
            storage_location,
        } => {
            let updated = apply_changes(
                manager.settings(),
                auto_save_on_close,
                auto_restore_default,
                storage_location,
            );
            if &updated == manager.settings() {
                println!("{}", "Settings unchanged.".yellow());
                return Ok(());
            }

            manager.update_settings(updated).await?;
            println!("{}", "Settings updated.".green());
            print_settings(manager.settings());
        }
    }

    Ok(())
}

/// Overlay the given changes on `current`
pub fn apply_changes(
    current: &Settings,
    auto_save_on_close: Option<bool>,
    auto_restore_default: Option<bool>,
    storage_location: Option<StorageLocation>,
) -> Settings {
    Settings {
        auto_save_on_close: auto_save_on_close.unwrap_or(current.auto_save_on_close),
        auto_restore_default: auto_restore_default.unwrap_or(current.auto_restore_default),
        storage_location: storage_location.unwrap_or(current.storage_location),
    }
}

fn enabled(flag: bool) -> colored::ColoredString {
    if flag {
        "Enabled".green()
    } else {
        "Disabled".red()
    }
}

fn print_settings(settings: &Settings) {
    println!(
        "Auto-save on close:   {}",
        enabled(settings.auto_save_on_close)
    );
    println!(
        "Auto-restore default: {}",
        enabled(settings.auto_restore_default)
    );
    println!(
        "Storage location:     {}",
        settings.storage_location.to_string().cyan()
    );
}
