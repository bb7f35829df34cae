// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reactive settings store.
//!
//! `SettingsStore` holds an [`AdaptKitConfig`] and announces every value
//! change as a [`ConfigurationChangeEvent`], which makes it usable as the
//! configuration half of a [`WorkspaceHost`](adaptkit_core::WorkspaceHost).

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

use adaptkit_core::{
    AdaptKitError, AffectedKey, ConfigurationChangeEvent, EventEmitter, Subscription, Uri,
};
use serde_json::Value;
use tracing::debug;

use crate::model::{
    folder_key, AdaptKitConfig, SectionSettings, LOGFILE_KEY, LOGPANEL_KEY, SECTION_KEYS,
};

/// Configuration values plus change notification.
pub struct SettingsStore {
    config: RwLock<AdaptKitConfig>,
    changes: EventEmitter<ConfigurationChangeEvent>,
}

impl SettingsStore {
    pub fn new(config: AdaptKitConfig) -> Self {
        Self {
            config: RwLock::new(config),
            changes: EventEmitter::new(),
        }
    }

    /// A copy of the current configuration.
    pub fn snapshot(&self) -> AdaptKitConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resolve `<section>.<key>` for `scope`.
    pub fn get(&self, section: &str, key: &str, scope: Option<&Uri>) -> Option<Value> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .value(section, key, scope)
    }

    /// Set `<section>.<key>` globally (`scope == None`) or for one folder.
    ///
    /// `Value::Null` clears the value. A change event fires only when the
    /// stored value actually changed.
    pub fn update(
        &self,
        section: &str,
        key: &str,
        value: Value,
        scope: Option<&Uri>,
    ) -> Result<(), AdaptKitError> {
        let changed = {
            let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
            let settings = match scope {
                Some(scope) => config
                    .folders
                    .entry(folder_key(scope))
                    .or_default()
                    .sections
                    .entry(section.to_string())
                    .or_default(),
                None => config.sections.entry(section.to_string()).or_default(),
            };
            apply(settings, key, value)?
        };

        if changed {
            debug!(section, key, scope = ?scope.map(|s| s.to_string()), "setting updated");
            self.changes.fire(&ConfigurationChangeEvent::new(vec![AffectedKey {
                key: format!("{section}.{key}"),
                scope: scope.cloned(),
            }]));
        }
        Ok(())
    }

    /// Swap in a whole new configuration, announcing every value that differs.
    pub fn replace(&self, new_config: AdaptKitConfig) {
        let event = {
            let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
            let event = diff(&config, &new_config);
            *config = new_config;
            event
        };

        if !event.is_empty() {
            debug!(changed = event.affected.len(), "configuration replaced");
            self.changes.fire(&event);
        }
    }

    /// Subscribe to configuration changes.
    pub fn on_did_change(
        &self,
        listener: impl Fn(&ConfigurationChangeEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.changes.subscribe(listener)
    }

    /// Number of attached change listeners.
    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(AdaptKitConfig::default())
    }
}

fn apply(settings: &mut SectionSettings, key: &str, value: Value) -> Result<bool, AdaptKitError> {
    match key {
        LOGPANEL_KEY => {
            let new = match value {
                Value::Null => None,
                Value::Bool(b) => Some(b),
                other => {
                    return Err(AdaptKitError::Config(format!(
                        "{LOGPANEL_KEY} expects a boolean, got {other}"
                    )))
                }
            };
            Ok(std::mem::replace(&mut settings.logpanel, new) != new)
        }
        LOGFILE_KEY => {
            let new = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => {
                    return Err(AdaptKitError::Config(format!(
                        "{LOGFILE_KEY} expects a string, got {other}"
                    )))
                }
            };
            let old = std::mem::replace(&mut settings.logfile, new);
            Ok(old != settings.logfile)
        }
        other => Err(AdaptKitError::Config(format!(
            "unknown setting `{other}` (expected one of: {})",
            SECTION_KEYS.join(", ")
        ))),
    }
}

/// Every `(key, scope)` whose resolved raw value differs between `old` and `new`.
fn diff(old: &AdaptKitConfig, new: &AdaptKitConfig) -> ConfigurationChangeEvent {
    let mut affected = Vec::new();

    let sections: BTreeSet<&String> = old.sections.keys().chain(new.sections.keys()).collect();
    for section in sections {
        let before = old.sections.get(section);
        let after = new.sections.get(section);
        for key in SECTION_KEYS {
            if before.and_then(|s| s.get(key)) != after.and_then(|s| s.get(key)) {
                affected.push(AffectedKey {
                    key: format!("{section}.{key}"),
                    scope: None,
                });
            }
        }
    }

    let folders: BTreeSet<&String> = old.folders.keys().chain(new.folders.keys()).collect();
    for folder in folders {
        let Ok(scope) = folder.parse::<Uri>() else {
            continue;
        };
        let before = old.folders.get(folder);
        let after = new.folders.get(folder);
        let sections: BTreeSet<&String> = before
            .into_iter()
            .chain(after)
            .flat_map(|f| f.sections.keys())
            .collect();
        for section in sections {
            let before = before.and_then(|f| f.sections.get(section));
            let after = after.and_then(|f| f.sections.get(section));
            for key in SECTION_KEYS {
                if before.and_then(|s| s.get(key)) != after.and_then(|s| s.get(key)) {
                    affected.push(AffectedKey {
                        key: format!("{section}.{key}"),
                        scope: Some(scope.clone()),
                    });
                }
            }
        }
    }

    ConfigurationChangeEvent::new(affected)
}
