use crate::error::Result;
use crate::manager::{sort_by_last_used, LoadReport, TabGroupManager};
use crate::storage::TabGroup;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use prettytable::{format, Table};
use rustyline::DefaultEditor;

/// List all groups, most recently used first
pub async fn list_groups(manager: &TabGroupManager, json: bool) -> Result<()> {
    let mut groups = manager.list_groups().await;
    sort_by_last_used(&mut groups);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("{}", "No tab groups saved yet.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "Name".bold(),
        "Files".bold(),
        "Last Used".bold(),
        "Created".bold()
    ]);

    for group in &groups {
        let name = if group.is_default() {
            format!("{} {}", group.group_name, "(default)".green())
        } else {
            group.group_name.clone()
        };

        table.add_row(prettytable::row![
            name.cyan(),
            group.files.len(),
            format_timestamp(&group.last_used),
            format_timestamp(&group.created_at)
        ]);
    }

    println!("\nTab Groups ({}):", manager.settings().storage_location);
    table.printstd();
    println!();

    Ok(())
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Save the editor's open documents as `name`
pub async fn save_group(manager: &TabGroupManager, name: &str) -> Result<()> {
    let group = manager.save_open_tabs(name).await?;
    println!(
        "{}",
        format!(
            "Tab group '{}' saved successfully ({} files)",
            group.group_name,
            group.files.len()
        )
        .green()
    );
    Ok(())
}

/// Load `name`, opening its files
///
/// Status goes to stderr: without an opener command the paths themselves
/// are written to stdout.
pub async fn load_group(manager: &TabGroupManager, name: &str) -> Result<()> {
    let report = manager.load_tab_group(name).await?;
    print_load_report(&report);
    Ok(())
}

pub(crate) fn print_load_report(report: &LoadReport) {
    if report.failed.is_empty() {
        eprintln!(
            "{}",
            format!(
                "Tab group '{}' loaded successfully",
                report.group.group_name
            )
            .green()
        );
        return;
    }

    eprintln!(
        "{}",
        format!(
            "Tab group '{}' loaded: {} opened, {} skipped",
            report.group.group_name,
            report.opened.len(),
            report.failed.len()
        )
        .yellow()
    );
    for path in &report.failed {
        eprintln!("  {} {}", "skipped".red(), path);
    }
}

/// Delete `name`, asking for confirmation unless `yes` is set
pub async fn delete_group(manager: &TabGroupManager, name: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete tab group '{}'? [y/N] ", name))? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    manager.delete_tab_group(name).await?;
    println!(
        "{}",
        format!("Tab group '{}' deleted successfully", name).green()
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut rl = DefaultEditor::new()?;
    match rl.readline(prompt) {
        Ok(line) => Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes")),
        Err(_) => Ok(false),
    }
}

/// Rename `old_name` to `new_name`; identical names are a no-op
pub async fn rename_group(manager: &TabGroupManager, old_name: &str, new_name: &str) -> Result<()> {
    if old_name == new_name {
        println!("{}", "Name unchanged.".yellow());
        return Ok(());
    }

    manager.rename_tab_group(old_name, new_name).await?;
    println!(
        "{}",
        format!("Tab group renamed from '{}' to '{}'", old_name, new_name).green()
    );
    Ok(())
}

/// Make `name` the default group
pub async fn set_default_group(manager: &TabGroupManager, name: &str) -> Result<()> {
    manager.set_default_tab_group(name).await?;
    println!(
        "{}",
        format!("Tab group '{}' set as default", name).green()
    );
    Ok(())
}

/// Print the default group
pub async fn show_default_group(manager: &TabGroupManager, json: bool) -> Result<()> {
    let group = manager.get_default_tab_group().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&group)?);
        return Ok(());
    }

    match group {
        Some(group) => print_group(&group),
        None => println!("{}", "No default tab group set.".yellow()),
    }
    Ok(())
}

fn print_group(group: &TabGroup) {
    println!("{}", group.group_name.cyan().bold());
    println!("  Last used: {}", format_timestamp(&group.last_used));
    println!("  Created:   {}", format_timestamp(&group.created_at));
    for path in &group.files {
        println!("  {}", path);
    }
}

/// Shutdown hook
pub async fn auto_save(manager: &TabGroupManager) -> Result<()> {
    match manager.auto_save_current_tabs().await? {
        Some(group) => tracing::info!(files = group.files.len(), "Auto-saved open tabs"),
        None => tracing::debug!("Auto-save is disabled"),
    }
    Ok(())
}

/// Startup hook
pub async fn auto_restore(manager: &TabGroupManager) -> Result<()> {
    if let Some(report) = manager.auto_restore_default_tab_group().await? {
        print_load_report(&report);
    }
    Ok(())
}
