use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use marksearch_search::CONFIG_TEMPLATE;

use crate::config::config_path;

pub fn run() {
    let Some(path) = config_path() else {
        eprintln!("Could not determine config directory");
        return;
    };

    if let Err(e) = ensure_exists(&path) {
        eprintln!("{:#}", e);
        return;
    }

    println!("Opening {}", path.display());

    if let Ok(editor) = std::env::var("EDITOR") {
        match Command::new(&editor).arg(&path).status() {
            Ok(s) if s.success() => return,
            Ok(s) => log::warn!("{} exited with {}", editor, s),
            Err(e) => eprintln!("Failed to run {}: {}", editor, e),
        }
    }

    open_with_platform_editor(&path);
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(path, CONFIG_TEMPLATE).context("Failed to create config file")?;
    log::info!("Created {}", path.display());
    Ok(())
}

fn open_with_platform_editor(path: &Path) {
    #[cfg(target_os = "macos")]
    {
        let _ = Command::new("open").arg("-t").arg(path).status();
    }

    #[cfg(target_os = "linux")]
    {
        if Command::new("xdg-open").arg(path).status().is_err() {
            for editor in ["nano", "vim", "vi"] {
                if Command::new(editor).arg(path).status().is_ok() {
                    return;
                }
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let _ = Command::new("notepad").arg(path).status();
    }
}
