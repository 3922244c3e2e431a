//! Scripts owned by the proxy package

use crate::error::EjectError;
use crate::proxy::ProxyConfig;
use crate::templates::StringMap;

/// One script the proxy owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedScript {
    pub name: String,
    /// Literal the script must hold for ejection to touch it
    pub expected: String,
    /// Replacement after ejection; `None` removes the script
    pub ejected: Option<String>,
}

/// A change ejection makes to one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRewrite {
    pub name: String,
    pub from: String,
    pub to: Option<String>,
}

/// The fixed set of scripts the proxy owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedScriptSet {
    scripts: Vec<ManagedScript>,
}

impl ManagedScriptSet {
    pub fn from_proxy(proxy: &ProxyConfig) -> Self {
        let dev = proxy.dev_script.name();
        let managed = |name: &str, ejected: Option<String>| ManagedScript {
            name: name.to_string(),
            expected: proxy.invocation(name),
            ejected,
        };

        Self {
            scripts: vec![
                managed(dev, Some(proxy.build_command(true))),
                managed("build", Some(proxy.build_command(false))),
                managed("setup", Some(proxy.ejected_setup_command())),
                managed("eject", None),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagedScript> {
        self.scripts.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ManagedScript> {
        self.scripts.iter().find(|s| s.name == name)
    }

    /// Every managed script that is present must still hold its literal
    pub fn check_fidelity(&self, scripts: &StringMap) -> Result<(), EjectError> {
        for managed in &self.scripts {
            match scripts.get(&managed.name) {
                Some(current) if current != managed.expected => {
                    return Err(EjectError::ScriptFidelityViolation {
                        script: managed.name.clone(),
                        expected: managed.expected.clone(),
                        found: current.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Rewrites for every managed script that holds its literal
    pub fn rewrites(&self, scripts: &StringMap) -> Vec<ScriptRewrite> {
        self.scripts
            .iter()
            .filter(|managed| scripts.get(&managed.name) == Some(managed.expected.as_str()))
            .map(|managed| ScriptRewrite {
                name: managed.name.clone(),
                from: managed.expected.clone(),
                to: managed.ejected.clone(),
            })
            .collect()
    }
}

/// Apply rewrites in place, keeping script order
pub fn apply_rewrites(scripts: &mut StringMap, rewrites: &[ScriptRewrite]) {
    for rewrite in rewrites {
        match &rewrite.to {
            Some(to) => scripts.insert(rewrite.name.clone(), to.clone()),
            None => {
                scripts.remove(&rewrite.name);
            }
        }
    }
}
