//! Export template compilation and rendering
//!
//! Templates are minijinja templates rendered against a fixed context: the
//! snapshot is exposed as `sets`, and every set exposes `ID` and `Endpoints`.

use std::io::Write;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;

use contracts::{DispatcherSet, ExportError};

/// Default template, compatible with kamailio's dispatcher module flat file
/// source.
pub const DEFAULT_TEMPLATE: &str = "\
# Dispatcher sets.
# WARNING: THIS FILE IS AUTOMATICALLY GENERATED.

{% for set in sets %}
# Dispatcher set {{ set.ID }}
{% for endpoint in set.Endpoints %}
{{ set.ID }} sip:{{ endpoint }}
{% endfor %}
{% endfor %}
";

const TEMPLATE_NAME: &str = "dispatchers";

/// Root context handed to the template
#[derive(Serialize)]
struct RenderContext<'a> {
    sets: &'a [DispatcherSet],
}

/// A parsed template, immutable after construction
pub(crate) struct CompiledTemplate {
    env: Environment<'static>,
    source: String,
}

impl CompiledTemplate {
    /// Compile `source`, falling back to [`DEFAULT_TEMPLATE`] when it is empty
    pub(crate) fn compile(source: &str) -> Result<Self, ExportError> {
        let source = if source.is_empty() {
            DEFAULT_TEMPLATE
        } else {
            source
        };

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template_owned(TEMPLATE_NAME, source.to_string())
            .map_err(|e| ExportError::template_parse(e.line(), e))?;

        Ok(Self {
            env,
            source: source.to_string(),
        })
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    /// Stream the rendering of `sets` into `writer`
    pub(crate) fn render_to<W: Write>(
        &self,
        sets: &[DispatcherSet],
        writer: W,
    ) -> Result<(), minijinja::Error> {
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;
        tmpl.render_to_write(Value::from_serialize(RenderContext { sets }), writer)?;
        Ok(())
    }
}
