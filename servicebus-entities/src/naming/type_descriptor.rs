//! Identity of a message type as seen by topic naming.

/// Assembly (crate) name and fully qualified type name of a message type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TypeDescriptor {
    assembly_name: String,
    full_name: String,
}

impl TypeDescriptor {
    pub fn new(assembly_name: &str, full_name: &str) -> Self {
        Self {
            assembly_name: assembly_name.to_string(),
            full_name: full_name.to_string(),
        }
    }

    /// Builds the descriptor of a Rust type from its [`std::any::type_name`].
    ///
    /// The crate is the leading path segment and path separators are rendered as `.`,
    /// so `my_app::events::OrderPlaced` has assembly `my_app` and full name
    /// `my_app.events.OrderPlaced`.
    pub fn of<T: ?Sized>() -> Self {
        let type_name = std::any::type_name::<T>();
        let assembly_name = type_name
            .split(|c: char| c == ':' || c == '<')
            .next()
            .unwrap_or(type_name);

        Self {
            assembly_name: assembly_name.to_string(),
            full_name: type_name.replace("::", "."),
        }
    }

    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// `"{full_name}, {assembly_name}"`, the identifier legacy topic names are built from.
    pub fn simple_assembly_qualified_name(&self) -> String {
        format!("{}, {}", self.full_name, self.assembly_name)
    }
}

#[cfg(test)]
mod tests {
    use super::TypeDescriptor;

    mod events {
        pub struct OrderPlaced;
    }

    #[test]
    fn of_splits_crate_and_dotted_path() {
        let descriptor = TypeDescriptor::of::<events::OrderPlaced>();

        assert_eq!(descriptor.assembly_name(), "servicebus_entities");
        assert_eq!(
            descriptor.full_name(),
            "servicebus_entities.naming.type_descriptor.tests.events.OrderPlaced"
        );
    }

    #[test]
    fn simple_assembly_qualified_name_puts_assembly_last() {
        let descriptor = TypeDescriptor::new("Orders.Contracts", "Orders.Contracts.OrderPlaced");

        assert_eq!(
            descriptor.simple_assembly_qualified_name(),
            "Orders.Contracts.OrderPlaced, Orders.Contracts"
        );
    }
}
