use std::fmt::Display;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.street, self.number)?;
        if !self.complement.is_empty() {
            write!(f, " {}", self.complement)?;
        }
        write!(f, " - {}, {}/{}", self.district, self.city, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(complement: &str) -> Address {
        Address {
            street: "Main St".to_string(),
            number: "10".to_string(),
            complement: complement.to_string(),
            district: "Center".to_string(),
            city: "Springfield".to_string(),
            state: "SP".to_string(),
        }
    }

    #[test]
    fn test_address_display() {
        assert_eq!(address("").to_string(), "Main St, 10 - Center, Springfield/SP");
        assert_eq!(
            address("Apt 2").to_string(),
            "Main St, 10 Apt 2 - Center, Springfield/SP"
        );
    }
}
