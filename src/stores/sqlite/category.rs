//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    DatabaseID, Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, NewCategory},
    stores::CategoryStore,
    stores::sqlite::parse_text_column,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return an error if the name is empty or there is an
    /// SQL error.
    fn create(&mut self, new_category: NewCategory) -> Result<Category, Error> {
        let name = new_category.validated_name()?;

        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO category (name, kind, color, icon) VALUES (?1, ?2, ?3, ?4);",
            (
                name.as_ref(),
                new_category.category_type.as_str(),
                new_category.color.as_str(),
                &new_category.icon,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category {
            id,
            name,
            category_type: new_category.category_type,
            color: new_category.color,
            icon: new_category.icon,
        })
    }

    /// Retrieve the category with `category_id` from the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, kind, color, icon FROM category WHERE id = :id;")?
            .query_row(&[(":id", &category_id)], SQLiteCategoryStore::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all categories in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, kind, color, icon FROM category;")?
            .query_map([], SQLiteCategoryStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Replace the category with `category_id` in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyName] if the new name is empty,
    /// - [Error::UpdateMissingCategory] if `category_id` does not refer to a
    ///   valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        category_id: DatabaseID,
        new_category: NewCategory,
    ) -> Result<Category, Error> {
        let name = new_category.validated_name()?;

        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1, kind = ?2, color = ?3, icon = ?4 WHERE id = ?5;",
            (
                name.as_ref(),
                new_category.category_type.as_str(),
                new_category.color.as_str(),
                &new_category.icon,
                category_id,
            ),
        )?;

        if rows_updated == 0 {
            return Err(Error::UpdateMissingCategory);
        }

        Ok(Category {
            id: category_id,
            name,
            category_type: new_category.category_type,
            color: new_category.color,
            icon: new_category.icon,
        })
    }

    /// Remove the category with `category_id` from the database.
    ///
    /// Transactions and budgets referencing the category are removed with it.
    ///
    /// # Errors
    /// This function will return a [Error::DeleteMissingCategory] if
    /// `category_id` does not refer to a valid category.
    fn delete(&mut self, category_id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM category WHERE id = ?1;", (category_id,))?;

        if rows_deleted == 0 {
            return Err(Error::DeleteMissingCategory);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                color TEXT NOT NULL,
                icon TEXT
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let raw_type: String = row.get(offset + 2)?;
        let category_type = parse_text_column(&raw_type, offset + 2)?;

        let raw_color: String = row.get(offset + 3)?;
        let color = parse_text_column(&raw_color, offset + 3)?;

        let icon = row.get(offset + 4)?;

        Ok(Self::ReturnType {
            id,
            name,
            category_type,
            color,
            icon,
        })
    }
}

#[cfg(test)]
mod category_store_tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryColor, NewCategory, TransactionType},
    };

    use super::{CategoryStore, SQLiteCategoryStore};

    fn get_test_store() -> SQLiteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        SQLiteCategoryStore::new(connection.clone())
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            category_type: TransactionType::Expense,
            color: CategoryColor::Green,
            icon: None,
        }
    }

    #[test]
    fn create_category_succeeds() {
        let mut store = get_test_store();

        let category = store.create(new_category("Groceries")).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name.as_ref(), "Groceries");
        assert_eq!(category.category_type, TransactionType::Expense);
        assert_eq!(category.color, CategoryColor::Green);
    }

    #[test]
    fn create_category_fails_on_empty_name() {
        let mut store = get_test_store();

        let result = store.create(new_category(""));

        assert_eq!(result, Err(Error::EmptyName));
    }

    #[test]
    fn get_category_succeeds() {
        let mut store = get_test_store();
        let inserted_category = store.create(new_category("Foo")).unwrap();

        let selected_category = store.get(inserted_category.id);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let mut store = get_test_store();
        let inserted_category = store.create(new_category("Foo")).unwrap();

        let selected_category = store.get(inserted_category.id + 123);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories() {
        let mut store = get_test_store();

        let inserted_categories = HashSet::from([
            store.create(new_category("Foo")).unwrap(),
            store.create(new_category("Bar")).unwrap(),
        ]);

        let selected_categories = store.get_all().unwrap();
        let selected_categories = HashSet::from_iter(selected_categories);

        assert_eq!(inserted_categories, selected_categories);
    }

    #[test]
    fn update_category_replaces_fields() {
        let mut store = get_test_store();
        let inserted_category = store.create(new_category("Foo")).unwrap();

        let updated_category = store
            .update(
                inserted_category.id,
                NewCategory {
                    name: "Bar".to_string(),
                    category_type: TransactionType::Income,
                    color: CategoryColor::Blue,
                    icon: Some("wallet".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated_category.id, inserted_category.id);
        assert_eq!(store.get(inserted_category.id), Ok(updated_category));
    }

    #[test]
    fn update_missing_category_returns_error() {
        let mut store = get_test_store();

        let result = store.update(999, new_category("Foo"));

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn delete_category_removes_it() {
        let mut store = get_test_store();
        let inserted_category = store.create(new_category("Foo")).unwrap();

        store.delete(inserted_category.id).unwrap();

        assert_eq!(store.get(inserted_category.id), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_category_returns_error() {
        let mut store = get_test_store();

        let result = store.delete(999);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }
}
