#![allow(dead_code)]
use glcore::{mock::MockApi, Context, ContextConfig, GlError};
use tracing_subscriber::filter::LevelFilter;

pub const VERTEX_SHADER: &str = r#"#version 450
in vec3 position;
in vec2 uv;
uniform mat4 transform;
void main() {}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 450
uniform vec3 color;
uniform sampler2D tex;
out vec4 frag;
void main() {}
"#;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::TRACE)
        .try_init();
}

/// A context over a fresh mock driver.
///
/// Errors are not polled by the context, so that tests can check them with `errors`.
pub struct Fixture {
    pub ctx: Context,
    pub mock: MockApi,
}

impl Fixture {
    pub fn new() -> Fixture {
        Fixture::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Fixture {
        init_logging();
        let mock = MockApi::new();
        let ctx = Context::new(mock.clone(), config.check_errors(false));
        Fixture { ctx, mock }
    }

    pub fn strict() -> Fixture {
        Fixture::with_config(ContextConfig::default().strict_unbind(true))
    }

    /// Drains the driver error queue.
    pub fn errors(&self) -> Vec<GlError> {
        let mut errors = Vec::new();
        while let Some(error) = self.ctx.poll_error() {
            errors.push(error);
        }
        errors
    }

    pub fn assert_no_errors(&self) {
        assert_eq!(self.errors(), Vec::<GlError>::new());
    }
}
