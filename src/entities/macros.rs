//! Macros for reducing boilerplate when declaring shaped resources

/// Implement [`Shape`](crate::core::shape::Shape) for a type by listing its
/// fields in declaration order
///
/// Each entry pairs the canonical field name with a reader expression. The
/// reader may return anything convertible into
/// [`FieldValue`](crate::core::field::FieldValue).
///
/// # Example
/// ```rust,ignore
/// impl_shape!(AuthorDto, "AuthorDto", {
///     "id" => |a| a.id,
///     "name" => |a| a.name.clone(),
///     "age" => |a| a.age,
/// });
/// ```
#[macro_export]
macro_rules! impl_shape {
    ($type:ty, $shape_name:literal, { $($field:literal => |$src:ident| $read:expr),+ $(,)? }) => {
        impl $crate::core::shape::Shape for $type {
            const SHAPE_NAME: &'static str = $shape_name;

            const FIELDS: &'static [$crate::core::shape::FieldAccessor<Self>] = &[
                $(
                    $crate::core::shape::FieldAccessor::new($field, |$src: &$type| {
                        $crate::core::field::FieldValue::from($read)
                    })
                ),+
            ];
        }
    };
}
