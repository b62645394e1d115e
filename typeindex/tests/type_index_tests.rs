use std::collections::{BTreeSet, HashSet};

use typeindex::{
    register_ctti_class, type_id, type_id_runtime, type_id_with_cvr, RuntimeTypeIndex, TypeIndex,
};

mod my_namespace1 {
    pub struct MyClass;
}

mod my_namespace2 {
    pub struct MyClass;
}

#[test]
fn test_names() {
    assert_eq!(type_id::<i32>().pretty_name(), "i32");
    assert_eq!(type_id::<f64>().pretty_name(), "f64");
    assert_eq!(type_id::<&str>().pretty_name(), "str");
    assert_eq!(type_id::<()>().pretty_name(), "()");
    assert_eq!(
        type_id::<Vec<u8>>().pretty_name(),
        "alloc::vec::Vec<u8>"
    );

    assert_eq!(type_id::<i32>().name(), type_id::<i32>().name());
    assert_ne!(type_id::<i32>().name(), type_id::<f64>().name());
    assert_ne!(type_id::<f64>().raw_name(), type_id::<i32>().raw_name());
}

#[test]
fn test_user_defined_names() {
    let name = type_id::<my_namespace1::MyClass>().pretty_name();
    assert!(name.contains("MyClass"), "{}", name);
    assert!(name.ends_with("my_namespace1::MyClass"), "{}", name);
}

#[test]
fn test_comparators() {
    let t_int = type_id::<i32>();
    let t_double = type_id::<f64>();

    assert_eq!(t_int, t_int);
    assert!(t_int <= t_int);
    assert!(t_int >= t_int);
    assert_ne!(t_int, t_double);

    assert!(t_double < t_int || t_int < t_double);
    assert!(t_double > t_int || t_int > t_double);
    assert_eq!(t_int < t_double, t_int.before(&t_double));
}

#[test]
fn test_hash_code() {
    let t_int1 = type_id::<i32>();
    let t_int2 = type_id::<i32>();
    let t_double = type_id::<f64>();

    assert_eq!(t_int1.hash_code(), t_int2.hash_code());
    assert_ne!(t_int1.hash_code(), t_double.hash_code());

    let set: HashSet<TypeIndex> = [t_int1, t_int2, t_double, type_id::<&i32>()].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_ordered_collections() {
    let set: BTreeSet<TypeIndex> = [
        type_id::<u8>(),
        type_id::<u16>(),
        type_id::<&u8>(),
        type_id_with_cvr::<&u8>(),
        type_id::<String>(),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 4);
    assert!(set.contains(&type_id::<&mut u16>()));
}

fn check_modifiers<T1: ?Sized + 'static, T2: ?Sized + 'static>() {
    let t1 = type_id_with_cvr::<T1>();
    let t2 = type_id_with_cvr::<T2>();

    assert_ne!(t2, t1);
    assert!(t1 < t2 || t2 < t1);
    assert!(t1 > t2 || t2 > t1);

    assert_eq!(t1, type_id_with_cvr::<T1>());
    assert_eq!(t2, type_id_with_cvr::<T2>());

    assert_eq!(t1.hash_code(), type_id_with_cvr::<T1>().hash_code());
    assert_eq!(t2.hash_code(), type_id_with_cvr::<T2>().hash_code());
    assert_ne!(t1.hash_code(), type_id_with_cvr::<T2>().hash_code());
}

#[test]
fn test_storing_modifiers() {
    check_modifiers::<i32, &'static i32>();
    check_modifiers::<i32, &'static mut i32>();
    check_modifiers::<&'static i32, &'static mut i32>();
    check_modifiers::<&'static i32, &'static &'static i32>();
    check_modifiers::<[u8], &'static [u8]>();
    check_modifiers::<my_namespace1::MyClass, &'static my_namespace1::MyClass>();
    check_modifiers::<*const u8, *mut u8>();
    check_modifiers::<Option<&'static u8>, Option<&'static mut u8>>();
}

#[test]
fn test_storing_modifiers_matches_plain() {
    let t1 = type_id_with_cvr::<i32>();
    let t2 = type_id::<i32>();

    assert_eq!(t2, t1);
    assert_eq!(t1, t2);
    assert!(t1 <= t2 && t1 >= t2);
    assert_eq!(t2.pretty_name(), t1.pretty_name());
    assert_eq!(t2.hash_code(), t1.hash_code());
}

#[test]
fn test_storing_modifiers_vs_nonstoring() {
    let t1 = type_id_with_cvr::<&'static i32>();
    let t2 = type_id::<&'static i32>();

    assert_ne!(t2, t1);
    assert_eq!(t1.pretty_name(), "&i32");
    assert_eq!(t2.pretty_name(), "i32");
}

#[test]
fn test_display() {
    assert_eq!(type_id::<i32>().to_string(), "i32");
    assert_eq!(type_id::<f64>().to_string(), "f64");
    assert_eq!(format!("[{:>5}]", type_id::<u8>()), "[   u8]");
    assert!(format!("{:?}", type_id::<u8>()).contains("\"u8\""));
}

#[test]
fn test_stripping_references() {
    assert_eq!(type_id::<i32>(), type_id::<&i32>());
    assert_eq!(type_id::<i32>(), type_id::<&mut i32>());
    assert_eq!(type_id::<i32>(), type_id::<&&mut i32>());
    assert_eq!(type_id::<i32>(), type_id::<&mut &i32>());

    assert_eq!(type_id::<f64>(), type_id::<&f64>());
    assert_eq!(type_id::<f64>(), type_id::<&mut &mut f64>());

    // Only top-level layers are stripped:
    assert_ne!(type_id::<Option<u8>>(), type_id::<Option<&u8>>());
    assert_ne!(type_id::<*const u8>(), type_id::<u8>());
}

#[test]
fn test_user_defined_classes() {
    assert_eq!(type_id::<my_namespace1::MyClass>(), type_id::<my_namespace1::MyClass>());
    assert_eq!(type_id::<my_namespace2::MyClass>(), type_id::<my_namespace2::MyClass>());

    assert_ne!(type_id::<my_namespace1::MyClass>(), type_id::<my_namespace2::MyClass>());
    assert!(!type_id::<my_namespace1::MyClass>()
        .pretty_name()
        .contains("my_namespace2"));
}

#[test]
fn test_descriptor_comparisons() {
    let idx = type_id::<my_namespace1::MyClass>();
    let info = *idx.type_info();

    assert!(idx == info);
    assert!(info == idx);
    assert!(info != type_id::<my_namespace2::MyClass>());
    assert!(type_id::<my_namespace2::MyClass>() != info);
    assert_eq!(
        idx.partial_cmp(&info),
        Some(std::cmp::Ordering::Equal)
    );
    assert_eq!(
        info.partial_cmp(&type_id::<my_namespace2::MyClass>()),
        Some(idx.cmp(&type_id::<my_namespace2::MyClass>()))
    );
}

#[test]
fn test_default() {
    assert_eq!(TypeIndex::default(), type_id::<()>());
    assert_ne!(TypeIndex::default(), type_id::<u8>());
}

trait Shape: RuntimeTypeIndex {
    fn area(&self) -> f64;
}

struct Circle(f64);
struct Square(f64);

impl Shape for Circle {
    fn area(&self) -> f64 {
        3.0 * self.0 * self.0
    }
}

impl Shape for Square {
    fn area(&self) -> f64 {
        self.0 * self.0
    }
}

register_ctti_class!(Circle);
register_ctti_class!(Square);

#[test]
fn test_runtime_comparators() {
    let circle = Circle(1.0);
    let square = Square(2.0);
    let shapes: [&dyn Shape; 2] = [&circle, &square];

    assert_eq!(type_id_runtime(shapes[0]), type_id::<Circle>());
    assert_eq!(type_id_runtime(shapes[1]), type_id::<Square>());
    assert_ne!(type_id_runtime(shapes[0]), type_id_runtime(shapes[1]));
    assert_eq!(type_id_runtime(shapes[0]), type_id_runtime(&circle));
    assert_eq!(shapes[1].area(), 4.0);

    let boxed: Box<dyn Shape> = Box::new(Square(1.0));
    assert_eq!(type_id_runtime(&*boxed), type_id::<Square>());
}
