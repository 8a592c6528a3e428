//! Render-time gating of view content.
//!
//! Both guards are generic over the node type `N` produced by the view
//! layer, so they work with whatever the console renders into.

use policy::{Capability, Principal};

/// Message shown by [`CapabilityGuard`] when asked to explain a denial.
pub const DEFAULT_DENIAL_MESSAGE: &str = "You do not have permission to view this content.";

/// Result of rendering through a [`CapabilityGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<N> {
    /// The protected content, unchanged.
    Content(N),
    /// An informational notice in place of the content.
    Notice(String),
    /// The caller-supplied fallback.
    Fallback(N),
    /// Nothing at all.
    Empty,
}

impl<N> Rendered<N> {
    /// The node to mount, if any. A notice has no node of type `N`.
    pub fn into_node(self) -> Option<N> {
        match self {
            Rendered::Content(node) | Rendered::Fallback(node) => Some(node),
            Rendered::Notice(_) | Rendered::Empty => None,
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, Rendered::Content(_))
    }
}

/// Shows a subtree only to principals holding one capability.
///
/// The check runs on every render; nothing is cached between calls, so a
/// principal change takes effect on the next render.
#[derive(Debug, Clone)]
pub struct CapabilityGuard<N> {
    capability: Capability,
    fallback: Option<N>,
    show_message: bool,
    message: String,
}

impl<N> CapabilityGuard<N> {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            fallback: None,
            show_message: false,
            message: DEFAULT_DENIAL_MESSAGE.to_string(),
        }
    }

    /// Node to render instead of the content when denied.
    pub fn fallback(mut self, node: N) -> Self {
        self.fallback = Some(node);
        self
    }

    /// Render a notice instead of the fallback when denied.
    pub fn show_message(mut self, show: bool) -> Self {
        self.show_message = show;
        self
    }

    /// Override the notice text.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Render `content` if the capability is held.
    pub fn render(&self, principal: Option<&Principal>, content: N) -> Rendered<N>
    where
        N: Clone,
    {
        self.render_with(principal, || content)
    }

    /// Like [`render`](Self::render), but only builds the content when it
    /// will be shown.
    pub fn render_with<F>(&self, principal: Option<&Principal>, content: F) -> Rendered<N>
    where
        N: Clone,
        F: FnOnce() -> N,
    {
        if policy::has_capability(principal, self.capability) {
            return Rendered::Content(content());
        }

        if self.show_message {
            return Rendered::Notice(self.message.clone());
        }

        match &self.fallback {
            Some(node) => Rendered::Fallback(node.clone()),
            None => Rendered::Empty,
        }
    }
}

/// An action control that exists only for principals allowed to use it.
///
/// When denied, rendering produces no node at all. There is deliberately no
/// disabled state: a disabled button would still reveal its label.
#[derive(Debug, Clone)]
pub struct CapabilityControl<N> {
    required: Vec<Capability>,
    child: N,
}

impl<N> CapabilityControl<N> {
    pub fn new(capability: Capability, child: N) -> Self {
        Self {
            required: vec![capability],
            child,
        }
    }

    /// A control shown when any one of `capabilities` is held.
    pub fn any_of(capabilities: &[Capability], child: N) -> Self {
        Self {
            required: capabilities.to_vec(),
            child,
        }
    }

    pub fn render(&self, principal: Option<&Principal>) -> Option<N>
    where
        N: Clone,
    {
        policy::has_any_capability(principal, &self.required).then(|| self.child.clone())
    }

    /// Consume the control, yielding its child only when permitted.
    pub fn into_rendered(self, principal: Option<&Principal>) -> Option<N> {
        policy::has_any_capability(principal, &self.required).then_some(self.child)
    }
}
