//! # Route Table
//!
//! The `RouteTable` is the ordered list of `(AddressTemplate, handler)` bindings.
//! It is assembled once with [`RouteTable::builder`] and never mutated afterwards;
//! the [`Dispatcher`](crate::Dispatcher) only ever holds it behind an `Arc`.
//!
//! ## Resolution
//!
//! An identifier is split once into its segments. Templates are then tried in
//! registration order:
//!
//! - a template whose segment count or literals do not fit is skipped
//! - the first template that fits is the route; if its placeholders fail to
//!   decode (or are empty) resolution fails right there
//! - if nothing fits, the identifier is an unknown resource
//!
//! This makes `spacetraders://systems` and `spacetraders://systems/{systemSymbol}`
//! distinct routes by shape alone.

use crate::error::{DispatchError, TemplateError};
use crate::handler::ResourceHandler;
use crate::identifier::ResourceIdentifier;
use crate::template::{AddressTemplate, ExtractedParameters};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One binding of the table.
pub struct Route<C, R> {
    template: AddressTemplate,
    name: String,
    description: String,
    mime_type: String,
    handler: Arc<dyn ResourceHandler<C, R>>,
}

impl<C, R> Route<C, R> {
    pub fn template(&self) -> &AddressTemplate {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> &Arc<dyn ResourceHandler<C, R>> {
        &self.handler
    }

    pub fn descriptor(&self) -> RouteDescriptor {
        RouteDescriptor {
            uri_template: self.template.as_str().to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

impl<C, R> std::fmt::Debug for Route<C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.template.as_str())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Serializable description of a route, as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub uri_template: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// A route picked for an identifier, together with its extracted parameters.
pub struct Resolved<'a, C, R> {
    pub route: &'a Route<C, R>,
    pub params: ExtractedParameters,
}

/// The immutable, ordered route table.
pub struct RouteTable<C, R> {
    scheme: &'static str,
    routes: Vec<Route<C, R>>,
}

impl<C, R> RouteTable<C, R>
where
    C: Send + Sync,
{
    pub fn builder(scheme: &'static str) -> RouteTableBuilder<C, R> {
        RouteTableBuilder {
            scheme,
            routes: Vec::new(),
        }
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn routes(&self) -> &[Route<C, R>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Descriptors for every route, in registration order.
    pub fn catalogue(&self) -> Vec<RouteDescriptor> {
        self.routes.iter().map(Route::descriptor).collect()
    }

    /// Finds the route for `identifier` and extracts its parameters.
    pub fn resolve(&self, identifier: &str) -> Result<Resolved<'_, C, R>, DispatchError> {
        let identifier = ResourceIdentifier::parse(identifier, self.scheme)?;

        for route in &self.routes {
            match route.template.extract(&identifier) {
                Ok(params) => {
                    debug!(uri = %identifier, route = %route.name, "Route matched");
                    return Ok(Resolved { route, params });
                }
                Err(e) if e.is_shape_mismatch() => continue,
                Err(e) => {
                    debug!(uri = %identifier, route = %route.name, error = %e, "Route rejected parameters");
                    return Err(e.into());
                }
            }
        }

        Err(DispatchError::UnknownResource(identifier.to_string()))
    }
}

impl<C, R> std::fmt::Debug for RouteTable<C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("scheme", &self.scheme)
            .field("routes", &self.routes)
            .finish()
    }
}

/// Collects routes in registration order and validates them.
pub struct RouteTableBuilder<C, R> {
    scheme: &'static str,
    routes: Vec<Route<C, R>>,
}

impl<C, R> RouteTableBuilder<C, R>
where
    C: Send + Sync,
{
    /// Registers `handler` for `template`.
    ///
    /// Fails if the template is malformed, or if a template of the same shape is
    /// already registered (it would shadow this one).
    pub fn route<H>(
        mut self,
        template: &str,
        name: &str,
        description: &str,
        handler: H,
    ) -> Result<Self, TemplateError>
    where
        H: ResourceHandler<C, R> + 'static,
    {
        let template = AddressTemplate::parse(template, self.scheme)?;
        if self.routes.iter().any(|r| r.template.same_shape(&template)) {
            return Err(TemplateError::DuplicateRoute {
                template: template.as_str().to_string(),
            });
        }
        self.routes.push(Route {
            template,
            name: name.to_string(),
            description: description.to_string(),
            mime_type: "application/json".to_string(),
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    pub fn build(self) -> RouteTable<C, R> {
        RouteTable {
            scheme: self.scheme,
            routes: self.routes,
        }
    }
}
