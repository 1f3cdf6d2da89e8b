// Grouping keys. One type per domain so a product name can never be mixed
// up with a customer or payment method of the same spelling.
use std::fmt;

macro_rules! name_key {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }
    };
}

name_key!(ProductName);
name_key!(CustomerName);
name_key!(MethodName);
name_key!(CategoryName);
// "DD/MM"; days from different months of the same number share a bucket.
name_key!(DayLabel);
