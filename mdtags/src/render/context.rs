use crate::dialect::Dialect;

/// Caller-facing options for a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub dialect: Dialect,
    /// Skip validation and render the tree as-is.
    pub recover: bool,
}

impl RenderOptions {
    pub fn new(dialect: Dialect) -> Self {
        RenderOptions {
            dialect,
            recover: false,
        }
    }

    pub fn recovering(mut self) -> Self {
        self.recover = true;
        self
    }
}

/// State threaded through validation and rendering.
///
/// `depth` is 1 at the root and grows by one per descent, so the direct
/// children of a Document see depth 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    dialect: Dialect,
    depth: usize,
    recover: bool,
}

impl Context {
    pub fn new(dialect: Dialect) -> Self {
        Context {
            dialect,
            depth: 1,
            recover: false,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn recover(&self) -> bool {
        self.recover
    }

    pub fn descend(&self) -> Context {
        Context {
            depth: self.depth + 1,
            ..*self
        }
    }
}

impl From<RenderOptions> for Context {
    fn from(options: RenderOptions) -> Self {
        Context {
            recover: options.recover,
            ..Context::new(options.dialect)
        }
    }
}
