/// Builds a [`Fields`](crate::value::Fields) map from `name => value` pairs.
///
/// ```
/// let fields = kvmodel_core::fields! {
///     "name" => "Sami",
///     "age" => 29,
/// };
/// assert_eq!(2, fields.len());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::value::Fields::new()
    };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {{
        let mut fields = $crate::value::Fields::new();
        $(
            fields.insert(
                ::std::string::String::from($name),
                $crate::Value::from($value),
            );
        )+
        fields
    }};
}
