//! Statement text for the higher-level verbs.
//!
//! Only structural fragments (table names, column lists, conditions,
//! ordering) are interpolated here, verbatim and unchecked. Values always
//! travel separately as bound parameters.

pub fn create_table(table: &str, columns: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {table} ({columns})")
}

/// `INSERT` with one `?` placeholder per value.
pub fn insert(table: &str, columns: &str, value_count: usize) -> String {
    let placeholders = vec!["?"; value_count].join(", ");
    format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})")
}

pub fn update(table: &str, assignments: &str, condition: &str) -> String {
    format!("UPDATE {table} SET {assignments} WHERE {condition}")
}

pub fn delete(table: &str, condition: &str) -> String {
    format!("DELETE FROM {table} WHERE {condition}")
}

pub fn select_all(table: &str) -> String {
    format!("SELECT * FROM {table}")
}

pub fn select_where(table: &str, condition: &str) -> String {
    format!("SELECT * FROM {table} WHERE {condition}")
}

pub fn select_all_ordered(table: &str, order_by: &str) -> String {
    format!("SELECT * FROM {table} ORDER BY {order_by}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_has_one_placeholder_per_value() {
        assert_eq!(
            insert("users", "id, name", 2),
            "INSERT INTO users (id, name) VALUES (?, ?)"
        );
        assert_eq!(insert("t", "a", 1), "INSERT INTO t (a) VALUES (?)");
    }

    #[test]
    fn fragments_are_interpolated_verbatim() {
        assert_eq!(
            create_table("users", "id INTEGER PRIMARY KEY, name TEXT"),
            "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT)"
        );
        assert_eq!(
            update("users", "name = ?", "id = ?"),
            "UPDATE users SET name = ? WHERE id = ?"
        );
        assert_eq!(delete("users", "1 = 1"), "DELETE FROM users WHERE 1 = 1");
        assert_eq!(select_all("users"), "SELECT * FROM users");
        assert_eq!(
            select_where("users", "name LIKE ?"),
            "SELECT * FROM users WHERE name LIKE ?"
        );
        assert_eq!(
            select_all_ordered("users", "name DESC, id"),
            "SELECT * FROM users ORDER BY name DESC, id"
        );
    }
}
