/// Extracts structured information from Postgres constraint violation messages.
///
/// Constraint names are expected to follow the Diesel/Postgres convention of
/// `{table}_{column}_key` for unique indexes and `{table}_{column}_fkey` for
/// foreign keys.
pub struct ConstraintParser;

impl ConstraintParser {
    /// Parses `{table}_{column}_key` style constraint names into (entity, field).
    pub fn parse_constraint_name(name: &str) -> Option<(String, String)> {
        let trimmed = name
            .strip_suffix("_key")
            .or_else(|| name.strip_suffix("_fkey"))
            .or_else(|| name.strip_suffix("_check"))?;

        let (table, column) = trimmed.split_once('_')?;
        // Foreign key columns keep their `_id` suffix out of the field name
        let column = column.strip_suffix("_id").unwrap_or(column);
        Some((table.to_string(), column.to_string()))
    }

    /// Parses `{table}_{column}_fkey` keeping the full column name.
    pub fn parse_foreign_key_constraint_name(name: &str) -> Option<(String, String)> {
        let trimmed = name.strip_suffix("_fkey")?;
        let (table, column) = trimmed.split_once('_')?;
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts `(field, value)` from a `DETAIL: Key (field)=(value) ...` message.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let detail = message.split("Key (").nth(1)?;
        let (field, rest) = detail.split_once(")=(")?;
        let value = rest.split(')').next()?;
        Some((field.to_string(), value.to_string()))
    }

    /// Extracts the column name from a `null value in column "..."` message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        let rest = message.split("column \"").nth(1)?;
        let column = rest.split('"').next()?;
        Some(column.to_string())
    }

    /// Returns (entity, field, value) for a unique violation.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (entity, _) = constraint_name.and_then(Self::parse_constraint_name)?;
        let (field, value) = Self::extract_key_value_from_message(message)?;
        Some((entity, field, value))
    }

    /// Returns (entity, field) for a not-null violation.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = constraint_name
            .and_then(Self::parse_constraint_name)
            .map(|(entity, _)| entity)
            .unwrap_or_else(|| "record".to_string());
        Some((entity, field))
    }

    /// Returns (entity, field, referenced value) for a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (entity, field) = constraint_name.and_then(Self::parse_foreign_key_constraint_name)?;
        let value = Self::extract_key_value_from_message(message)
            .map(|(_, value)| value)
            .unwrap_or_else(|| "unknown".to_string());
        Some((entity, field, value))
    }

    /// Returns (entity, field) for a check violation.
    pub fn parse_check_violation(
        _message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        constraint_name.and_then(Self::parse_constraint_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_name() {
        let result = ConstraintParser::parse_constraint_name("workspaces_name_key");
        assert_eq!(result, Some(("workspaces".to_string(), "name".to_string())));

        let result = ConstraintParser::parse_constraint_name("messages_conversation_id_fkey");
        assert_eq!(
            result,
            Some(("messages".to_string(), "conversation".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_constraint_name() {
        let result =
            ConstraintParser::parse_foreign_key_constraint_name("integrations_workspace_id_fkey");
        assert_eq!(
            result,
            Some(("integrations".to_string(), "workspace_id".to_string()))
        );
    }

    #[test]
    fn test_extract_key_value_from_message() {
        let message = "duplicate key value violates unique constraint \"contacts_email_key\"\nDETAIL: Key (email)=(a@b.com) already exists.";
        let result = ConstraintParser::extract_key_value_from_message(message);
        assert_eq!(result, Some(("email".to_string(), "a@b.com".to_string())));
    }

    #[test]
    fn test_extract_column_from_message() {
        let message = "null value in column \"content\" violates not-null constraint";
        let result = ConstraintParser::extract_column_from_message(message);
        assert_eq!(result, Some("content".to_string()));
    }

    #[test]
    fn test_parse_unique_violation() {
        let message = "duplicate key value violates unique constraint \"contacts_email_key\"\nDETAIL: Key (email)=(a@b.com) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("contacts_email_key"));
        assert_eq!(
            result,
            Some((
                "contacts".to_string(),
                "email".to_string(),
                "a@b.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"messages\" violates foreign key constraint \"messages_conversation_id_fkey\"\nDETAIL: Key (conversation_id)=(42) is not present in table \"conversations\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some("messages_conversation_id_fkey"),
        );
        assert_eq!(
            result,
            Some((
                "messages".to_string(),
                "conversation_id".to_string(),
                "42".to_string()
            ))
        );
    }
}
