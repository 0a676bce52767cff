/// Builder-style setters for request and draft fields.
///
/// `setter!(name: Ty)` assigns directly, `setter!(opt name: Ty)` wraps the
/// value in `Some` for optional fields.
macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };

    (opt $field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = ::std::option::Option::Some($field.into());
            self
        }
    };
}

pub(crate) use setter;
