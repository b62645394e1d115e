//! Type identities constructed on the far side of a crate boundary.
//!
//! Every function in this crate creates its identities here, so they are
//! instantiated in this crate's codegen units rather than the caller's.

use typeindex::runtime_cast::RuntimeClass;
use typeindex::{register_runtime_class, type_id, type_id_with_cvr, TypeIndex};

pub mod user_defined_namespace {
    pub struct UserDefined;
}

use user_defined_namespace::UserDefined;

mod anonymous {
    pub struct UserDefined;
}

pub fn get_integer() -> TypeIndex {
    type_id::<i32>()
}

pub fn get_user_defined_class() -> TypeIndex {
    type_id::<UserDefined>()
}

pub fn get_const_integer() -> TypeIndex {
    type_id_with_cvr::<&'static i32>()
}

pub fn get_const_user_defined_class() -> TypeIndex {
    type_id_with_cvr::<&'static UserDefined>()
}

/// Identity of a type which cannot be named outside of this crate.
pub fn get_anonymous_user_defined_class() -> TypeIndex {
    type_id::<anonymous::UserDefined>()
}

pub fn get_const_anonymous_user_defined_class() -> TypeIndex {
    type_id_with_cvr::<&'static anonymous::UserDefined>()
}

pub fn accept_typeindex(_: &TypeIndex) {}

pub struct PluginBase {
    pub version: u32,
}
register_runtime_class!(PluginBase);

pub struct Plugin {
    pub base: PluginBase,
    pub name: &'static str,
}
register_runtime_class!(Plugin { base });

/// A registered value, erased to its lookup interface before leaving this
/// crate.
pub fn make_plugin(name: &'static str, version: u32) -> Box<dyn RuntimeClass> {
    Box::new(Plugin {
        base: PluginBase { version },
        name,
    })
}
