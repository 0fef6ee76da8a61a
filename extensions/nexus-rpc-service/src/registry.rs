//! Lookup from `(service, method)` to the schemas needed to call it.
//!
//! Interface definitions are plain data handed to the constructors below; the
//! registry never discovers methods by itself. Once built, a registry is only
//! read, so it is shared behind `Arc` by every in-flight call without locking.

use crate::error::NotFoundError;
use nexus::constants::SUCCESS_FIELD_NAME;
use nexus::{Field, FieldType, StructSchema};
use std::collections::HashMap;
use std::sync::Arc;

/// One method as written in an interface definition.
///
/// Either schema may be missing, e.g. when code generation only produced part
/// of an interface. Such methods are left out of the registry.
#[derive(Debug, Clone)]
pub struct MethodDeclaration {
    pub name: String,
    pub args: Option<Arc<StructSchema>>,
    pub result: Option<Arc<StructSchema>>,
    pub oneway: bool,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
            result: None,
            oneway: false,
        }
    }

    pub fn args(mut self, schema: Arc<StructSchema>) -> Self {
        self.args = Some(schema);
        self
    }

    pub fn result(mut self, schema: Arc<StructSchema>) -> Self {
        self.result = Some(schema);
        self
    }

    pub fn oneway(mut self) -> Self {
        self.oneway = true;
        self
    }
}

/// A named service and the methods it declares.
#[derive(Debug, Clone)]
pub struct InterfaceDefinition {
    pub name: String,
    pub methods: Vec<MethodDeclaration>,
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// Everything needed to encode a call to one method and interpret its reply.
#[derive(Debug)]
pub struct MethodDescriptor {
    name: String,
    args_schema: Arc<StructSchema>,
    result_schema: Arc<StructSchema>,
    oneway: bool,
}

impl MethodDescriptor {
    /// Validates a declaration. Returns `None` when it cannot be exposed.
    fn from_declaration(service: &str, declaration: MethodDeclaration) -> Option<Self> {
        let (Some(args_schema), Some(result_schema)) = (declaration.args, declaration.result)
        else {
            tracing::debug!(
                "Excluding `{}.{}`: missing argument or result schema",
                service,
                declaration.name
            );
            return None;
        };

        if let Some(field) = result_schema
            .fields()
            .iter()
            .find(|field| field.name != SUCCESS_FIELD_NAME && field.ty.as_struct().is_none())
        {
            tracing::warn!(
                "Excluding `{}.{}`: result field `{}` is not an exception struct",
                service,
                declaration.name,
                field.name
            );
            return None;
        }

        Some(Self {
            name: declaration.name,
            args_schema,
            result_schema,
            oneway: declaration.oneway,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args_schema(&self) -> &Arc<StructSchema> {
        &self.args_schema
    }

    pub fn result_schema(&self) -> &Arc<StructSchema> {
        &self.result_schema
    }

    pub fn is_oneway(&self) -> bool {
        self.oneway
    }

    /// The `success` slot, absent for void methods.
    pub fn success_field(&self) -> Option<&Field> {
        self.result_schema.field_by_name(SUCCESS_FIELD_NAME)
    }

    /// Declared exception slots in ascending field-id order, each with the
    /// schema of the exception struct it carries.
    pub fn exception_fields(&self) -> impl Iterator<Item = (&Field, &Arc<StructSchema>)> {
        self.result_schema.fields().iter().filter_map(|field| {
            if field.name == SUCCESS_FIELD_NAME {
                return None;
            }
            match &field.ty {
                FieldType::Struct(schema) => Some((field, schema)),
                _ => None,
            }
        })
    }
}

/// A registered service: its name and the methods that passed validation.
#[derive(Debug)]
pub struct ServiceDefinition {
    name: String,
    methods: HashMap<String, Arc<MethodDescriptor>>,
}

impl ServiceDefinition {
    pub fn register(interface: InterfaceDefinition) -> Self {
        let name = interface.name;
        let methods = interface
            .methods
            .into_iter()
            .filter_map(|declaration| MethodDescriptor::from_declaration(&name, declaration))
            .map(|descriptor| (descriptor.name.clone(), Arc::new(descriptor)))
            .collect();

        Self { name, methods }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    pub fn resolve(&self, method: &str) -> Result<Arc<MethodDescriptor>, NotFoundError> {
        self.methods
            .get(method)
            .cloned()
            .ok_or_else(|| NotFoundError::Method {
                service: self.name.clone(),
                method: method.to_string(),
            })
    }

    pub fn methods(&self) -> impl Iterator<Item = &Arc<MethodDescriptor>> {
        self.methods.values()
    }
}

/// Services by name.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    services: HashMap<String, Arc<ServiceDefinition>>,
}

impl SchemaRegistry {
    pub fn new(interfaces: impl IntoIterator<Item = InterfaceDefinition>) -> Self {
        let mut services = HashMap::new();
        for interface in interfaces {
            let definition = ServiceDefinition::register(interface);
            let name = definition.name.clone();
            if services.insert(name.clone(), Arc::new(definition)).is_some() {
                tracing::warn!("Service `{}` registered twice; keeping the last one", name);
            }
        }
        Self { services }
    }

    pub fn service(&self, service: &str) -> Option<&Arc<ServiceDefinition>> {
        self.services.get(service)
    }

    pub fn has_method(&self, service: &str, method: &str) -> bool {
        self.services
            .get(service)
            .is_some_and(|definition| definition.has_method(method))
    }

    pub fn resolve(&self, service: &str, method: &str) -> Result<Arc<MethodDescriptor>, NotFoundError> {
        self.services
            .get(service)
            .ok_or_else(|| NotFoundError::Service {
                service: service.to_string(),
            })?
            .resolve(method)
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}
