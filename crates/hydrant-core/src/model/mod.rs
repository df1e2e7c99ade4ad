mod field;
mod shape;

pub use field::{FieldKind, FieldModel};
pub use shape::ModelShape;

#[cfg(test)]
mod tests {
    use crate::{
        model::FieldKind,
        test_fixtures::{Contact, Person},
        traits::ModelSchema,
    };

    #[test]
    fn shapes_list_fields_in_declaration_order() {
        let shape = <Person as ModelSchema>::SHAPE;

        assert_eq!(shape.model_name, "Person");
        assert_eq!(shape.len(), 3);
        assert_eq!(shape.field_index("name"), Some(0));
        assert_eq!(shape.field_index("age"), Some(1));
        assert_eq!(shape.field_index("address"), Some(2));
        assert_eq!(shape.field_index("missing"), None);

        assert_eq!(shape.fields[0].kind, FieldKind::Text);
        assert_eq!(shape.fields[1].kind, FieldKind::Int);
        assert_eq!(shape.fields[2].kind, FieldKind::Nested);
        assert!(shape.fields[0].kind.is_scalar());
        assert!(!shape.fields[2].kind.is_scalar());
    }

    #[test]
    fn nested_flags_follow_option_ness() {
        let person = <Person as ModelSchema>::SHAPE;
        let address = person.field("address").unwrap();
        assert!(address.is_nested());
        assert!(address.preconstructed);
        assert!(!address.nullable);
        assert!(address.nested_shape().unwrap().path.ends_with("Address"));

        let contact = <Contact as ModelSchema>::SHAPE;
        let home = contact.field("home").unwrap();
        assert!(home.is_nested());
        assert!(!home.preconstructed);
        assert!(home.nullable);
    }

    #[test]
    fn dynamic_construction_goes_through_the_shape() {
        let shape = <Person as ModelSchema>::SHAPE;
        let instance = (shape.new_boxed)();

        assert_eq!(instance.shape().path, shape.path);
    }
}
