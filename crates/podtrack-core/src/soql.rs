//! Small SOQL construction helpers. Queries in this domain are all of the
//! shape `SELECT <fields> FROM <type> WHERE <filter>` with user-supplied
//! values appearing only as quoted string literals.

/// Escape a value for use inside a single-quoted SOQL string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `SELECT a,b,c FROM record_type`.
pub fn select(fields: &[String], record_type: &str) -> String {
    format!("SELECT {} FROM {}", fields.join(","), record_type)
}

/// `SELECT a,b,c FROM record_type WHERE (Contact__r.auth0_user_id__c='...')`.
///
/// The foreign-key filter every per-user query in this domain shares: the
/// identity collaborator's opaque id matched against the contact link.
pub fn select_for_user(fields: &[String], record_type: &str, user_id: &str) -> String {
    format!(
        "{} WHERE (Contact__r.auth0_user_id__c={})",
        select(fields, record_type),
        quote(user_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plain_value() {
        assert_eq!(quote("auth0|123"), "'auth0|123'");
    }

    #[test]
    fn quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote("O'Brien"), "'O\\'Brien'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn select_joins_fields() {
        let fields = vec!["A__c".to_string(), "B__c".to_string()];
        assert_eq!(
            select(&fields, "Trainee_POD_Map__c"),
            "SELECT A__c,B__c FROM Trainee_POD_Map__c"
        );
    }

    #[test]
    fn select_for_user_filters_on_contact_link() {
        let fields = vec!["A__c".to_string()];
        let soql = select_for_user(&fields, "Trainee_POD_Map__c", "auth0|42");
        assert_eq!(
            soql,
            "SELECT A__c FROM Trainee_POD_Map__c WHERE (Contact__r.auth0_user_id__c='auth0|42')"
        );
    }
}
