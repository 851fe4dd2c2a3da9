//! Spec fixtures — decode-tracking and action-recording specs.

use plan_engine::{BuildContext, Result, Spec, SpecRegistry};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Accepts any attribute mapping; never up to date, actions are no-ops.
///
/// Decoded attributes are visible through `Debug`, which is what assertions
/// inspect.
#[derive(Debug, Deserialize)]
pub struct WidgetSpec {
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl<P> Spec<P> for WidgetSpec {
    fn equals(&self, _ctx: &BuildContext<'_, P>) -> Result<bool> {
        Ok(false)
    }

    fn apply(&self, _ctx: &BuildContext<'_, P>) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _ctx: &BuildContext<'_, P>) -> Result<()> {
        Ok(())
    }
}

/// Shared action log the [`ProbeSpec`] writes into.
pub type ActionLog = Arc<Mutex<Vec<String>>>;

pub fn action_log() -> ActionLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Records every apply/remove into a shared log, labelled by its `id`
/// attribute. `exists`/`equals` attributes control the checks (default
/// false, so `present` and `ensure` always act).
#[derive(Debug)]
pub struct ProbeSpec {
    pub id: String,
    pub exists: bool,
    pub equals: bool,
    log: ActionLog,
}

#[derive(Debug, Deserialize)]
struct ProbeAttrs {
    #[serde(default)]
    id: String,
    #[serde(default)]
    exists: bool,
    #[serde(default)]
    equals: bool,
}

impl ProbeSpec {
    pub fn new(id: impl Into<String>, log: ActionLog) -> Self {
        Self {
            id: id.into(),
            exists: false,
            equals: false,
            log,
        }
    }
}

impl<P> Spec<P> for ProbeSpec {
    fn equals(&self, _ctx: &BuildContext<'_, P>) -> Result<bool> {
        Ok(self.equals)
    }

    fn exists(&self, _ctx: &BuildContext<'_, P>) -> Result<bool> {
        Ok(self.exists)
    }

    fn apply(&self, _ctx: &BuildContext<'_, P>) -> Result<()> {
        self.log.lock().unwrap().push(format!("apply:{}", self.id));
        Ok(())
    }

    fn remove(&self, _ctx: &BuildContext<'_, P>) -> Result<()> {
        self.log.lock().unwrap().push(format!("remove:{}", self.id));
        Ok(())
    }
}

/// A fresh registry with `widget` → [`WidgetSpec`] and `probe` →
/// [`ProbeSpec`] wired to `log`.
pub fn fixture_registry<P: 'static>(log: ActionLog) -> SpecRegistry<P> {
    let mut registry = SpecRegistry::new();
    registry.register::<WidgetSpec>("widget");
    registry.register_with("probe", move |attrs| {
        let attrs: ProbeAttrs = serde_json::from_value(Value::Object(attrs.clone())).map_err(
            |source| plan_engine::Error::SpecDecode {
                tag: "probe".to_string(),
                source,
            },
        )?;
        Ok(Arc::new(ProbeSpec {
            id: attrs.id,
            exists: attrs.exists,
            equals: attrs.equals,
            log: log.clone(),
        }) as Arc<dyn Spec<P>>)
    });
    registry
}
