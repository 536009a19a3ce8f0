//! Demo forms shown by the launcher

use once_cell::sync::Lazy;
use std::sync::Arc;
use tui_forms::validators::{EmailValidator, EvenInteger};
use tui_forms::{
    Compose, Field, Form, FormData, FormOptions, FormSchema, FormType, Result, Value,
};

pub struct UserForm;

impl FormType for UserForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("UserForm")
                .field("name", Field::string().label("Name").required())
                .field(
                    "age",
                    Field::integer().label("Age").min_value(0).max_value(130),
                )
                .field("active", Field::boolean().label("Active User"))
                .build()
        });
        SCHEMA.clone()
    }
}

pub struct RegistrationForm;

impl FormType for RegistrationForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("RegistrationForm")
                .field(
                    "username",
                    Field::string()
                        .label("Username")
                        .required()
                        .help_text("Choose a unique username"),
                )
                .field(
                    "email",
                    Field::string()
                        .label("Email Address")
                        .required()
                        .validator(EmailValidator::default()),
                )
                .field("full_name", Field::string().label("Full Name").required())
                .field(
                    "agree_terms",
                    Field::boolean().label("I agree to the terms and conditions"),
                )
                .build()
        });
        SCHEMA.clone()
    }
}

pub struct ContactForm;

impl FormType for ContactForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("ContactForm")
                .field(
                    "name",
                    Field::string()
                        .label("Full Name")
                        .required()
                        .help_text("Enter your full name"),
                )
                .field(
                    "email",
                    Field::string()
                        .label("Email")
                        .required()
                        .validator(EmailValidator::default()),
                )
                .field(
                    "age",
                    Field::integer()
                        .label("Age (even numbers only)")
                        .min_value(18)
                        .max_value(100)
                        .validator(EvenInteger::default()),
                )
                .field(
                    "country",
                    Field::choice([
                        ("us", "United States"),
                        ("uk", "United Kingdom"),
                        ("ca", "Canada"),
                        ("au", "Australia"),
                    ])
                    .label("Country")
                    .required(),
                )
                .field(
                    "contact_by",
                    Field::choice([("email", "Email"), ("phone", "Phone")])
                        .label("Preferred contact")
                        .widget("radio"),
                )
                .field("subscribe", Field::boolean().label("Subscribe to newsletter"))
                .field(
                    "message",
                    Field::text()
                        .label("Message")
                        .help_text("Tell us about yourself"),
                )
                .build()
        });
        SCHEMA.clone()
    }
}

pub struct AddressForm;

impl FormType for AddressForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("AddressForm")
                .field("street", Field::string().label("Street Address").required())
                .field("city", Field::string().label("City").required())
                .field("state", Field::string().label("State/Province").required())
                .field("postal_code", Field::string().label("Postal Code").required())
                .build()
        });
        SCHEMA.clone()
    }
}

pub struct PersonalInfoForm;

impl FormType for PersonalInfoForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("PersonalInfoForm")
                .field("first_name", Field::string().label("First Name").required())
                .field("last_name", Field::string().label("Last Name").required())
                .field(
                    "email",
                    Field::string()
                        .label("Email")
                        .required()
                        .validator(EmailValidator::default()),
                )
                .field("phone", Field::string().label("Phone"))
                .build()
        });
        SCHEMA.clone()
    }
}

/// Personal details plus one billing address
pub struct OrderForm;

impl FormType for OrderForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("OrderForm")
                .compose(
                    "personal",
                    PersonalInfoForm::schema(),
                    Compose::unprefixed().title("Personal Information"),
                )
                .compose("billing", AddressForm::schema(), Compose::prefix("billing"))
                .field("notes", Field::string().label("Order Notes"))
                .build()
        });
        SCHEMA.clone()
    }
}

/// Personal details plus billing and shipping addresses
pub struct ShippingOrderForm;

impl FormType for ShippingOrderForm {
    fn schema() -> Arc<FormSchema> {
        static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
            FormSchema::builder("ShippingOrderForm")
                .compose(
                    "personal",
                    PersonalInfoForm::schema(),
                    Compose::unprefixed().title("Personal Information"),
                )
                .compose("billing", AddressForm::schema(), Compose::prefix("billing"))
                .compose("shipping", AddressForm::schema(), Compose::prefix("shipping"))
                .field(
                    "same_as_billing",
                    Field::boolean().label("Shipping same as billing"),
                )
                .field("notes", Field::string().label("Order Notes"))
                .build()
        });
        SCHEMA.clone()
    }
}

fn data<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> FormData {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), Some(value)))
        .collect()
}

fn customer_data() -> FormData {
    data([
        ("first_name", Value::from("John")),
        ("last_name", Value::from("Doe")),
        ("email", Value::from("john@example.com")),
        ("phone", Value::from("555-1234")),
        ("billing_street", Value::from("123 Main St")),
        ("billing_city", Value::from("Springfield")),
        ("billing_state", Value::from("IL")),
        ("billing_postal_code", Value::from("62701")),
        ("notes", Value::from("Please ring doorbell")),
    ])
}

/// Registration is refused without accepting the terms
fn require_terms(data: &FormData) -> std::result::Result<(), String> {
    match data.get("agree_terms") {
        Some(Some(Value::Bool(true))) => Ok(()),
        _ => Err("You must agree to the terms and conditions".to_string()),
    }
}

/// One entry of the launcher
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> Result<Form>,
    /// Names to look up with `get_field` once submitted
    pub lookups: &'static [&'static str],
    /// Extra acceptance check on submitted data
    pub check: Option<fn(&FormData) -> std::result::Result<(), String>>,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "Basic Form",
        description: "Text, integer and boolean fields",
        build: || {
            UserForm::form_with(FormOptions {
                title: Some("User Registration".into()),
                ..Default::default()
            })
        },
        lookups: &[],
        check: None,
    },
    Demo {
        name: "User Registration",
        description: "Email validation and help text",
        build: || {
            RegistrationForm::form_with(FormOptions {
                title: Some("Create Account".into()),
                ..Default::default()
            })
        },
        lookups: &[],
        check: Some(require_terms),
    },
    Demo {
        name: "Advanced Form",
        description: "Choices, radio buttons, custom validators and a text area",
        build: || {
            ContactForm::form_with(FormOptions {
                title: Some("Contact Us".into()),
                ..Default::default()
            })
        },
        lookups: &[],
        check: None,
    },
    Demo {
        name: "Nested Once",
        description: "One composed address, prefixed with billing",
        build: || {
            OrderForm::form_with(FormOptions {
                title: Some("Order Form - Composed from Reusable Forms".into()),
                data: Some(customer_data()),
                ..Default::default()
            })
        },
        lookups: &["street", "billing_street", "email"],
        check: None,
    },
    Demo {
        name: "Nested Twice",
        description: "The same address form composed as billing and shipping",
        build: || {
            let mut data = customer_data();
            data.extend(self::data([
                ("shipping_street", Value::from("456 Oak Ave")),
                ("shipping_city", Value::from("Chicago")),
                ("shipping_state", Value::from("IL")),
                ("shipping_postal_code", Value::from("60601")),
                ("same_as_billing", Value::Bool(false)),
            ]));
            ShippingOrderForm::form_with(FormOptions {
                title: Some("Order Form - Billing and Shipping".into()),
                data: Some(data),
                ..Default::default()
            })
        },
        lookups: &["billing_street", "email", "street"],
        check: None,
    },
];
