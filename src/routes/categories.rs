//! Handlers for creating, listing, updating, and deleting categories.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    DatabaseID, Error,
    models::{Category, NewCategory},
    state::CategoryState,
    stores::CategoryStore,
};

/// List all categories.
pub async fn get_categories<C>(
    State(state): State<CategoryState<C>>,
) -> Result<Json<Vec<Category>>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    state.category_store.get_all().map(Json)
}

/// Create a new category.
pub async fn create_category<C>(
    State(mut state): State<CategoryState<C>>,
    Json(new_category): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    let category = state.category_store.create(new_category)?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace the category with `category_id`.
pub async fn update_category<C>(
    State(mut state): State<CategoryState<C>>,
    Path(category_id): Path<DatabaseID>,
    Json(new_category): Json<NewCategory>,
) -> Result<Json<Category>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    state
        .category_store
        .update(category_id, new_category)
        .map(Json)
}

/// Delete the category with `category_id`.
pub async fn delete_category<C>(
    State(mut state): State<CategoryState<C>>,
    Path(category_id): Path<DatabaseID>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    state.category_store.delete(category_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod category_route_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryColor, NewCategory, TransactionType},
        state::CategoryState,
        stores::sqlite::SQLiteCategoryStore,
    };

    use super::{create_category, delete_category, get_categories, update_category};

    fn get_test_state() -> CategoryState<SQLiteCategoryStore> {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CategoryState {
            category_store: SQLiteCategoryStore::new(Arc::new(Mutex::new(connection))),
        }
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            category_type: TransactionType::Expense,
            color: CategoryColor::Teal,
            icon: None,
        }
    }

    #[tokio::test]
    async fn create_then_list_returns_category() {
        let state = get_test_state();

        let (status_code, Json(category)) =
            create_category(State(state.clone()), Json(new_category("Groceries")))
                .await
                .unwrap();
        assert_eq!(status_code, StatusCode::CREATED);

        let Json(categories) = get_categories(State(state)).await.unwrap();
        assert_eq!(categories, vec![category]);
    }

    #[tokio::test]
    async fn create_with_empty_name_is_rejected() {
        let state = get_test_state();

        let result = create_category(State(state), Json(new_category(""))).await;

        assert!(matches!(result, Err(Error::EmptyName)));
    }

    #[tokio::test]
    async fn update_replaces_category() {
        let state = get_test_state();
        let (_, Json(category)) =
            create_category(State(state.clone()), Json(new_category("Groceries")))
                .await
                .unwrap();

        let Json(updated) = update_category(
            State(state),
            Path(category.id),
            Json(new_category("Eating Out")),
        )
        .await
        .unwrap();

        assert_eq!(updated.name.as_ref(), "Eating Out");
    }

    #[tokio::test]
    async fn delete_missing_category_returns_error() {
        let state = get_test_state();

        let result = delete_category(State(state), Path(999)).await;

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }
}
