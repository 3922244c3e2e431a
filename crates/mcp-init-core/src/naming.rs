//! npm package name validation
//!
//! A generated project's directory name becomes its package name, so it has to
//! be publishable. Errors make a name invalid outright; warnings only matter
//! for new packages, which is always the case here.

/// Maximum length of a new package name
const MAX_LENGTH: usize = 214;

/// Names reserved by the registry
const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core modules; a package may not shadow them
const BUILTIN_MODULES: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console",
    "constants", "crypto", "dgram", "diagnostics_channel", "dns", "domain",
    "events", "fs", "http", "http2", "https", "inspector", "module", "net", "os",
    "path", "perf_hooks", "process", "punycode", "querystring", "readline",
    "repl", "stream", "string_decoder", "sys", "timers", "tls", "trace_events",
    "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

/// Result of validating a package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl NameValidation {
    /// Valid as the name of a package that does not exist yet
    pub fn valid_for_new_packages(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Errors followed by warnings
    pub fn problems(&self) -> Vec<String> {
        self.errors.iter().chain(&self.warnings).cloned().collect()
    }
}

/// Characters `encodeURIComponent` leaves untouched
fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}

fn is_url_safe_str(s: &str) -> bool {
    s.chars().all(is_url_safe)
}

/// `@scope/name` split into its parts, if it has that shape
fn split_scoped(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_prefix('@')?;
    let (scope, pkg) = rest.split_once('/')?;
    if scope.is_empty() || pkg.is_empty() || pkg.contains('/') {
        return None;
    }
    Some((scope, pkg))
}

/// Validate a package name against the registry's naming rules
pub fn validate_package_name(name: &str) -> NameValidation {
    let mut result = NameValidation::default();
    let errors = &mut result.errors;

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }
    for reserved in BLACKLIST {
        if name.eq_ignore_ascii_case(reserved) {
            errors.push(format!("{} is a blacklisted name", reserved));
        }
    }

    let warnings = &mut result.warnings;
    if BUILTIN_MODULES.contains(&name) {
        warnings.push(format!("{} is a core module name", name));
    }
    if name.len() > MAX_LENGTH {
        warnings.push(format!(
            "name can no longer contain more than {} characters",
            MAX_LENGTH
        ));
    }
    if name.to_lowercase() != name {
        warnings.push("name can no longer contain capital letters".to_string());
    }
    let unscoped = split_scoped(name).map(|(_, pkg)| pkg).unwrap_or(name);
    if unscoped.contains(['~', '\'', '!', '(', ')', '*']) {
        warnings.push(
            "name can no longer contain special characters (\"~'!()*\")".to_string(),
        );
    }

    if !is_url_safe_str(name) {
        let scoped_ok = split_scoped(name)
            .map(|(scope, pkg)| is_url_safe_str(scope) && is_url_safe_str(pkg))
            .unwrap_or(false);
        if !scoped_ok {
            result
                .errors
                .push("name can only contain URL-friendly characters".to_string());
        }
    }

    result
}
