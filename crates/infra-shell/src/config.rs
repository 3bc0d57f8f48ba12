// Interpreter configuration
// The command text always travels as one argument; only the interpreter
// itself tokenizes it.

/// Interpreter launch configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Interpreter binary (e.g. `powershell`, `sh`)
    pub program: String,
    /// Arguments placed before the command text for one-shot runs
    pub one_shot_args: Vec<String>,
    /// Arguments for a persistent stdin-fed session
    pub session_args: Vec<String>,
}

impl ShellConfig {
    /// PowerShell configuration (Windows hosts)
    pub fn powershell() -> Self {
        Self {
            program: "powershell".to_string(),
            one_shot_args: vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
            ],
            session_args: vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                "-".to_string(),
            ],
        }
    }

    /// POSIX sh configuration (development and CI on non-Windows hosts)
    pub fn sh() -> Self {
        Self {
            program: "sh".to_string(),
            one_shot_args: vec!["-c".to_string()],
            session_args: vec!["-s".to_string()],
        }
    }

    fn host_default() -> Self {
        #[cfg(windows)]
        {
            Self::powershell()
        }
        #[cfg(not(windows))]
        {
            Self::sh()
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::host_default()
    }
}
