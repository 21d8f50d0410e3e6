//! # Amass Adapter
//!
//! Translates validated tool requests into `amass` command-line
//! invocations, runs the binary as a bounded subprocess, and maps
//! every outcome to a human-readable result string.
//!
//! Validation failures, timeouts, and spawn errors are all returned as
//! plain strings; nothing here propagates an error to the transport.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use schemars::JsonSchema;
use serde::Deserialize;
use tokio::process::Command;

/// Hard wall-clock limit for a single amass run.
pub const EXEC_TIMEOUT: Duration = Duration::from_secs(300);

/// Parameters for one invocation of the amass tool.
///
/// `subcommand` is carried as a plain string rather than a closed enum
/// so an invalid value reaches the adapter and produces the documented
/// error message instead of a deserialization fault at the transport.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AmassRequest {
    /// Amass operation mode: "enum" for subdomain enumeration and
    /// network mapping, or "intel" for gathering intelligence about
    /// target domains from various sources.
    pub subcommand: String,
    /// Target domain to perform reconnaissance against (e.g. example.com).
    #[serde(default)]
    pub domain: Option<String>,
    /// Whether to include WHOIS data in intelligence gathering.
    #[serde(default)]
    pub intel_whois: Option<bool>,
    /// Organization name to search for during intelligence gathering
    /// (e.g. 'Example Corp').
    #[serde(default)]
    pub intel_organization: Option<String>,
    /// Enumeration approach: "active" includes DNS resolution and
    /// potential network interactions, "passive" only uses third-party
    /// sources. Defaults to active.
    #[serde(default)]
    pub enum_type: Option<String>,
    /// Whether to perform brute force subdomain discovery.
    #[serde(default)]
    pub enum_brute: Option<bool>,
    /// Path to a custom wordlist file for brute force operations.
    #[serde(default)]
    pub enum_brute_wordlist: Option<String>,
}

impl AmassRequest {
    fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }

    fn organization(&self) -> Option<&str> {
        self.intel_organization.as_deref().filter(|o| !o.is_empty())
    }

    fn wordlist(&self) -> Option<&str> {
        self.enum_brute_wordlist.as_deref().filter(|w| !w.is_empty())
    }

    /// Validates the request and builds the ordered argument list for
    /// the amass binary, starting with the subcommand. Returns a
    /// descriptive error string on any rule violation; no process is
    /// started until this succeeds.
    pub fn build_args(&self) -> Result<Vec<String>, String> {
        match self.subcommand.as_str() {
            "enum" => self.build_enum_args(),
            "intel" => self.build_intel_args(),
            other => Err(format!(
                "Error: subcommand must be 'enum' or 'intel', got '{other}'"
            )),
        }
    }

    fn build_enum_args(&self) -> Result<Vec<String>, String> {
        let Some(domain) = self.domain() else {
            return Err("Error: Domain parameter is required for 'enum' subcommand".to_string());
        };

        let mut args = vec!["enum".to_string(), "-d".to_string(), domain.to_string()];

        // Active is the implicit default; only passive needs a flag.
        if self.enum_type.as_deref() == Some("passive") {
            args.push("-passive".to_string());
        }

        if self.enum_brute.unwrap_or(false) {
            args.push("-brute".to_string());
            if let Some(wordlist) = self.wordlist() {
                args.push("-w".to_string());
                args.push(wordlist.to_string());
            }
        }

        Ok(args)
    }

    fn build_intel_args(&self) -> Result<Vec<String>, String> {
        if self.domain().is_none() && self.organization().is_none() {
            return Err(
                "Error: Either domain or organization parameter is required for 'intel' subcommand"
                    .to_string(),
            );
        }

        let whois = self.intel_whois.unwrap_or(false);
        let mut args = vec!["intel".to_string()];

        if let Some(domain) = self.domain() {
            // Compatibility quirk: supplying a domain under intel also
            // requires requesting whois, even though only the -d flag
            // depends on it.
            if !whois {
                return Err("Error: For domain parameter, whois is required".to_string());
            }
            args.push("-d".to_string());
            args.push(domain.to_string());
        }

        if let Some(org) = self.organization() {
            args.push("-org".to_string());
            args.push(org.to_string());
        }

        if whois {
            args.push("-whois".to_string());
        }

        Ok(args)
    }
}

/// Executes amass requests as bounded child processes.
///
/// Stateless per call; holds only the binary name and the timeout.
#[derive(Debug, Clone)]
pub struct AmassAdapter {
    binary: String,
    timeout: Duration,
}

impl AmassAdapter {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Runs one request end to end: validate, build arguments, execute,
    /// and map the outcome to a result string. Every failure mode is
    /// returned as descriptive text.
    pub async fn invoke(&self, request: &AmassRequest) -> String {
        let args = match request.build_args() {
            Ok(args) => args,
            Err(message) => return message,
        };

        tracing::info!("Executing: {} {}", self.binary, args.join(" "));

        self.run(&args).await
    }

    async fn run(&self, args: &[String]) -> String {
        // Explicit argument vector, never a shell: domain, organization
        // and wordlist are caller-controlled strings.
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return "Error: Amass binary not found. Please ensure amass is installed."
                    .to_string();
            }
            Ok(Err(e)) => return format!("Error executing amass: {e}"),
            // kill_on_drop reaps the child; partial output is discarded.
            Err(_) => return "Error: Amass command timed out after 5 minutes".to_string(),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut text = stdout.to_string();
        if !stderr.is_empty() {
            text.push_str(&format!("\nStderr: {stderr}"));
        }

        if !output.status.success() {
            // Signal-terminated children carry no exit code.
            let code = output.status.code().unwrap_or(-1);
            return format!("Amass exited with code {code}. Output: {text}");
        }

        if text.is_empty() {
            "Amass completed successfully with no output".to_string()
        } else {
            text
        }
    }
}
