/// Implement [`RuntimeClass`](crate::runtime_cast::RuntimeClass) for a struct.
///
/// `register_runtime_class!(Type)` registers a type without bases.
/// `register_runtime_class!(Type { field, ... })` registers a type whose named
/// (or positional) fields are its bases, to be searched in the given order
/// after the type's own identity. Base fields must either implement
/// `RuntimeClass` themselves or dereference to a type which does.
///
/// With the RTTI-free engine this also registers the type with
/// [`register_ctti_class!`](crate::register_ctti_class), making
/// [`type_id_runtime`](crate::type_id_runtime) available for it. The native
/// engine provides that for every `'static` type already.
#[macro_export]
macro_rules! register_runtime_class {
    ($ty:ty { $($base:tt),* $(,)? }) => {
        unsafe impl $crate::runtime_cast::RuntimeClass for $ty {
            fn find_instance(
                &self,
                idx: &$crate::TypeIndex,
            ) -> ::core::option::Option<::core::ptr::NonNull<()>> {
                #[allow(unused_imports)]
                use $crate::runtime_cast::RuntimeClass as _;

                if *idx == $crate::type_id_with_cvr::<Self>() {
                    return ::core::option::Option::Some(::core::ptr::NonNull::from(self).cast());
                }
                $(
                    if let ::core::option::Option::Some(found) = self.$base.find_instance(idx) {
                        return ::core::option::Option::Some(found);
                    }
                )*
                ::core::option::Option::None
            }

            fn find_instance_mut(
                &mut self,
                idx: &$crate::TypeIndex,
            ) -> ::core::option::Option<::core::ptr::NonNull<()>> {
                #[allow(unused_imports)]
                use $crate::runtime_cast::RuntimeClass as _;

                if *idx == $crate::type_id_with_cvr::<Self>() {
                    return ::core::option::Option::Some(::core::ptr::NonNull::from(self).cast());
                }
                $(
                    if let ::core::option::Option::Some(found) = self.$base.find_instance_mut(idx) {
                        return ::core::option::Option::Some(found);
                    }
                )*
                ::core::option::Option::None
            }
        }

        $crate::__register_type_id_runtime!($ty);
    };

    ($ty:ty) => {
        $crate::register_runtime_class!($ty {});
    };
}

#[cfg(typeindex_native_facade)]
#[doc(hidden)]
#[macro_export]
macro_rules! __register_type_id_runtime {
    ($ty:ty) => {};
}

#[cfg(not(typeindex_native_facade))]
#[doc(hidden)]
#[macro_export]
macro_rules! __register_type_id_runtime {
    ($ty:ty) => {
        $crate::register_ctti_class!($ty);
    };
}
