use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch layout for one CLI test: config, data dir, and workspace root
#[allow(dead_code)]
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
    pub data_dir: PathBuf,
    pub workspace: PathBuf,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create tempdir");
        let config = dir.path().join("config.yaml");
        let data_dir = dir.path().join("data");
        let workspace = dir.path().join("workspace");
        fs::create_dir_all(&workspace).expect("failed to create workspace");
        Self {
            dir,
            config,
            data_dir,
            workspace,
        }
    }

    /// Write a file inside the workspace and return its absolute path
    pub fn file(&self, name: &str) -> String {
        let path = self.workspace.join(name);
        fs::write(&path, "").expect("failed to write workspace file");
        path.to_string_lossy().into_owned()
    }

    /// `tabgroups` isolated from the user's config, data, and environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tabgroups").unwrap();
        cmd.env_remove("TABGROUPS_CONFIG")
            .env_remove("TABGROUPS_DATA_DIR")
            .env_remove("TABGROUPS_WORKSPACE")
            .env_remove("TABGROUPS_OPENER")
            .env_remove("RUST_LOG")
            .current_dir(&self.workspace)
            .arg("--config")
            .arg(&self.config)
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }

    /// Like [`Sandbox::cmd`] with the workspace root passed explicitly
    pub fn ws_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--workspace").arg(&self.workspace);
        cmd
    }
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
