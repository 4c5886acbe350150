use super::initializer::RouteInitializer;
use super::registry::StaticCatalog;
use super::types::{HandlerDescriptor, Marker, RouteDeclaration};
use crate::table::{Constraint, RouteConstraint, RouteEntry, RouteRegistry, RouteValue};
use crate::verbs::Verb;
use anyhow::{anyhow, Context};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Named custom matchers that catalog files can refer to.
#[derive(Default, Clone)]
pub struct ConstraintRegistry {
    matchers: HashMap<String, Arc<dyn RouteConstraint>>,
}

impl ConstraintRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a matcher under its own [`RouteConstraint::name`].
    pub fn register(&mut self, matcher: impl RouteConstraint + 'static) -> &mut Self {
        let matcher: Arc<dyn RouteConstraint> = Arc::new(matcher);
        self.matchers.insert(matcher.name().to_string(), matcher);
        self
    }

    fn resolve(&self, name: &str) -> anyhow::Result<Constraint> {
        self.matchers
            .get(name)
            .map(|m| Constraint::Custom(Arc::clone(m)))
            .ok_or_else(|| anyhow!("unknown constraint matcher '{name}'"))
    }
}

impl std::fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.matchers.keys()).finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    owners: Vec<OwnerDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OwnerDef {
    name: String,
    #[serde(default)]
    initializers: Vec<InitializerDef>,
    #[serde(default)]
    handlers: Vec<HandlerDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InitializerDef {
    name: String,
    #[serde(default)]
    routes: Vec<ManualRouteDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManualRouteDef {
    name: String,
    url: String,
    #[serde(default)]
    defaults: serde_json::Map<String, Value>,
    #[serde(default)]
    optional: Vec<String>,
    #[serde(default)]
    constraints: serde_json::Map<String, Value>,
    #[serde(default)]
    verbs: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HandlerDef {
    name: String,
    #[serde(default)]
    markers: Vec<MarkerDef>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum MarkerDef {
    Route {
        url: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        verb: Option<String>,
        #[serde(default)]
        defaults: serde_json::Map<String, Value>,
        #[serde(default)]
        constraints: serde_json::Map<String, Value>,
    },
    Verb {
        verb: String,
    },
    AcceptVerbs {
        verbs: Vec<String>,
    },
    NonAction,
    Default {
        name: String,
        value: Value,
    },
    Optional {
        name: String,
    },
    UrlParam {
        name: String,
        #[serde(default)]
        default: Option<Value>,
        #[serde(default)]
        optional: bool,
        #[serde(default)]
        constraint: Option<String>,
    },
    Constraint {
        name: String,
        #[serde(default)]
        pattern: Option<String>,
        #[serde(default)]
        matcher: Option<String>,
    },
}

fn parse_verb(token: &str) -> anyhow::Result<Verb> {
    Verb::parse(token).ok_or_else(|| anyhow!("unknown verb '{token}'"))
}

/// Constraint values in route objects: a regex string, a list of verbs,
/// or `{ matcher: name }`.
fn constraint_from_value(
    value: &Value,
    matchers: &ConstraintRegistry,
) -> anyhow::Result<Constraint> {
    match value {
        Value::String(pattern) => Ok(Constraint::pattern(pattern.as_str())),
        Value::Array(items) => {
            let verbs = items
                .iter()
                .map(|v| {
                    v.as_str()
                        .ok_or_else(|| anyhow!("verb list entries must be strings"))
                        .and_then(parse_verb)
                })
                .collect::<anyhow::Result<_>>()?;
            Ok(Constraint::methods(verbs))
        }
        Value::Object(obj) => match obj.get("matcher").and_then(Value::as_str) {
            Some(name) => matchers.resolve(name),
            None => Err(anyhow!("constraint object must name a 'matcher'")),
        },
        other => Err(anyhow!("unsupported constraint value {other}")),
    }
}

fn marker_from_def(def: MarkerDef, matchers: &ConstraintRegistry) -> anyhow::Result<Marker> {
    let marker = match def {
        MarkerDef::Route {
            url,
            name,
            verb,
            defaults,
            constraints,
        } => {
            let mut declaration = RouteDeclaration::new(url);
            declaration.name = name;
            declaration.verb = verb.as_deref().map(parse_verb).transpose()?;
            for (key, value) in defaults {
                declaration.defaults.set(key, RouteValue::from(value));
            }
            for (key, value) in &constraints {
                declaration
                    .constraints
                    .set(key.as_str(), constraint_from_value(value, matchers)?);
            }
            Marker::Route(declaration)
        }
        MarkerDef::Verb { verb } => Marker::Verb(parse_verb(&verb)?),
        MarkerDef::AcceptVerbs { verbs } => Marker::AcceptVerbs(verbs),
        MarkerDef::NonAction => Marker::NonAction,
        MarkerDef::Default { name, value } => Marker::Default {
            name,
            value: value.into(),
        },
        MarkerDef::Optional { name } => Marker::Optional { name },
        MarkerDef::UrlParam {
            name,
            default,
            optional,
            constraint,
        } => {
            let default = match (optional, default) {
                (true, Some(_)) => {
                    return Err(anyhow!(
                        "url_param '{name}' cannot be both optional and have a default"
                    ))
                }
                (true, None) => Some(RouteValue::Optional),
                (false, value) => value.map(RouteValue::from),
            };
            Marker::UrlParam {
                name,
                default,
                constraint,
            }
        }
        MarkerDef::Constraint {
            name,
            pattern,
            matcher,
        } => {
            let constraint = match (pattern, matcher) {
                (Some(pattern), None) => Constraint::pattern(pattern),
                (None, Some(matcher)) => matchers.resolve(&matcher)?,
                _ => {
                    return Err(anyhow!(
                        "constraint '{name}' needs exactly one of 'pattern' or 'matcher'"
                    ))
                }
            };
            Marker::Constraint { name, constraint }
        }
    };
    Ok(marker)
}

fn entry_from_def(def: &ManualRouteDef, matchers: &ConstraintRegistry) -> anyhow::Result<RouteEntry> {
    let mut entry = RouteEntry::new(def.name.as_str(), def.url.as_str());
    for (key, value) in &def.defaults {
        entry.defaults.set(key.as_str(), RouteValue::from(value.clone()));
    }
    for key in &def.optional {
        entry.defaults.set(key.as_str(), RouteValue::Optional);
    }
    for (key, value) in &def.constraints {
        entry
            .constraints
            .set(key.as_str(), constraint_from_value(value, matchers)?);
    }
    if !def.verbs.is_empty() {
        let verbs = def
            .verbs
            .iter()
            .map(|v| parse_verb(v))
            .collect::<anyhow::Result<_>>()?;
        entry.constraints.set("verb", Constraint::methods(verbs));
    }
    Ok(entry)
}

/// Declarative initializers become callbacks that register their routes in
/// order.
fn initializer_from_def(
    owner: &str,
    def: &InitializerDef,
    matchers: &ConstraintRegistry,
) -> anyhow::Result<RouteInitializer> {
    let entries = def
        .routes
        .iter()
        .map(|r| {
            entry_from_def(r, matchers)
                .with_context(|| format!("route '{}' of initializer '{}'", r.name, def.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(RouteInitializer::new(
        owner,
        def.name.as_str(),
        move |table: &mut dyn RouteRegistry| {
            for entry in &entries {
                table.register(entry.clone())?;
            }
            Ok(())
        },
    ))
}

fn catalog_from_file(file: CatalogFile, matchers: &ConstraintRegistry) -> anyhow::Result<StaticCatalog> {
    let mut catalog = StaticCatalog::new();
    for owner in file.owners {
        catalog.add_owner(&owner.name);
        for init in &owner.initializers {
            let initializer = initializer_from_def(&owner.name, init, matchers)
                .with_context(|| format!("owner '{}'", owner.name))?;
            catalog.add_initializer(initializer);
        }
        for handler in owner.handlers {
            let markers = handler
                .markers
                .into_iter()
                .map(|m| marker_from_def(m, matchers))
                .collect::<anyhow::Result<Vec<_>>>()
                .with_context(|| format!("handler '{}' in owner '{}'", handler.name, owner.name))?;
            catalog.add_handler(HandlerDescriptor::from_markers(
                owner.name.as_str(),
                handler.name,
                markers,
            ));
        }
    }
    Ok(catalog)
}

/// Parse catalog text. `yaml` selects YAML, otherwise JSON.
pub fn parse_catalog(
    content: &str,
    yaml: bool,
    matchers: &ConstraintRegistry,
) -> anyhow::Result<StaticCatalog> {
    let file: CatalogFile = if yaml {
        serde_yaml::from_str(content).context("invalid YAML catalog")?
    } else {
        serde_json::from_str(content).context("invalid JSON catalog")?
    };
    catalog_from_file(file, matchers)
}

/// Load a catalog file. The format follows the extension: `.yaml`/`.yml`
/// for YAML, anything else is read as JSON.
pub fn load_catalog(
    path: impl AsRef<Path>,
    matchers: &ConstraintRegistry,
) -> anyhow::Result<StaticCatalog> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    parse_catalog(&content, yaml, matchers)
        .with_context(|| format!("failed to load catalog {}", path.display()))
}
