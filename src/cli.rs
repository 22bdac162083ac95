pub mod command;
pub mod run;
pub mod shell;

use crate::prelude::{AppError, Contact};

pub use run::run_app;

// OUTPUT FUNCTIONS
pub fn display_contact(contact: &Contact) -> String {
    format!(
        "Id: {}\n\
        Name: {}\n\
        Address: {}\n\
        Number: {}\n\
        Email: {}\n\
        Image: {}\n\
        Status: {}",
        contact.id,
        contact.name,
        contact.address,
        contact.phone,
        contact.email,
        contact.image_url,
        contact.status()
    )
}

pub fn listing_line(position: usize, contact: &Contact) -> String {
    format!(
        "{position:>3}. {:<36} {:<20} {:15} {:^30} {:<20} {}",
        contact.id,
        contact.name,
        contact.phone,
        contact.email,
        contact.address,
        contact.status()
    )
}

// INPUT FUNCTIONS

/// Splits a shell line into arguments. Single or double quotes group words.
pub fn split_args(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(AppError::ParseCommand(format!("unterminated {} quote", q)));
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ContactFields;

    #[test]
    fn splits_quoted_words() -> Result<(), AppError> {
        let args = split_args(r#"add --name "Ann Lee" --address '1 Rd'  --phone 123"#)?;
        assert_eq!(
            args,
            vec!["add", "--name", "Ann Lee", "--address", "1 Rd", "--phone", "123"]
        );
        Ok(())
    }

    #[test]
    fn keeps_empty_quoted_argument() -> Result<(), AppError> {
        assert_eq!(split_args(r#"add --name """#)?, vec!["add", "--name", ""]);
        assert!(split_args("   ")?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(matches!(
            split_args(r#"add --name "Ann"#),
            Err(AppError::ParseCommand(_))
        ));
    }

    #[test]
    fn contact_card_shows_status() {
        let mut contact = Contact::new(
            "id-1".to_string(),
            ContactFields::new("Ann", "1234567", "a@b.com", "1 Rd", "https://x.com/i.png"),
        );
        contact.blocked = true;

        let card = display_contact(&contact);
        assert!(card.contains("Name: Ann"));
        assert!(card.ends_with("Status: blocked"));
    }
}
