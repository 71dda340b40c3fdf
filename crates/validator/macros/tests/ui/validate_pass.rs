use tagval_macros::Validate;
use tagval_validator::Validate as _;

#[derive(Validate)]
struct BarSubStruct {
    #[tagval("req,ip")]
    ip: String,
    port: u16,
}

#[derive(Validate)]
struct FooStruct {
    #[tagval("req")]
    name: String,
    #[tagval("req,email")]
    email: String,
    #[tagval("min(3),max(11)")]
    password: String,
    #[tagval("req,equals(password)")]
    confirm_pass: String,
    #[tagval("min(18),max(65)")]
    age: i32,
    #[tagval("url")]
    homepage: String,
    #[tagval(tag = "regex(^[a-z]+$)")]
    handle: String,
    #[tagval("obj")]
    sub: BarSubStruct,
    #[tagval("validate")]
    backup: Option<BarSubStruct>,
    #[tagval(skip)]
    cached: String,
    active: bool,
}

#[derive(Validate)]
struct Wrapper<T> {
    #[tagval("obj")]
    inner: T,
}

#[derive(Validate)]
struct Keywords {
    #[tagval("req")]
    r#type: String,
}

#[derive(Validate)]
struct Untagged {
    note: String,
}

fn main() {
    let sub = BarSubStruct {
        ip: "10.0.0.1".into(),
        port: 80,
    };
    assert!(sub.validate().pass());

    let wrapped = Wrapper { inner: sub };
    assert!(wrapped.validate().pass());

    let keywords = Keywords { r#type: String::new() };
    assert!(!keywords.validate().pass());

    let untagged = Untagged { note: String::new() };
    assert!(untagged.validate().pass());

    let _ = FooStruct {
        name: String::new(),
        email: String::new(),
        password: String::new(),
        confirm_pass: String::new(),
        age: 0,
        homepage: String::new(),
        handle: String::new(),
        sub: BarSubStruct { ip: String::new(), port: 0 },
        backup: None,
        cached: String::new(),
        active: false,
    }
    .validate();
}
