//! # Book Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - CRUD operations
//! - Multiset resolution of ordered book-id lists for purchases
//!
//! ## Multiset Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               find_all_by_ids([a, b, a, x])                             │
//! │                                                                         │
//! │  1. One IN query over the UNIQUE ids {a, b, x}                          │
//! │  2. Requested list mapped positionally through the results:            │
//! │       a → Book(a)   b → Book(b)   a → Book(a)   x → (dropped)          │
//! │  3. Result: [Book(a), Book(b), Book(a)]                                 │
//! │                                                                         │
//! │  Unresolved ids are silently dropped; the caller compares counts.      │
//! │  Duplicates resolve independently - each occurrence is its own line.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::{Book, BookCategory};

/// Row shape of the `books` table.
///
/// The category is carried as raw TEXT and parsed into the closed enum on
/// the way out; an unknown value fails loudly instead of defaulting.
#[derive(Debug, Clone, sqlx::FromRow)]
struct BookRow {
    id: String,
    title: String,
    author: String,
    price_cents: i64,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = DbError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let category = BookCategory::from_str(&row.category)
            .map_err(|_| DbError::InvalidCategory(row.category.clone()))?;

        Ok(Book {
            id: row.id,
            title: row.title,
            author: row.author,
            price_cents: row.price_cents,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_BOOK: &str =
    "SELECT id, title, author, price_cents, category, created_at, updated_at FROM books";

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Inserts a book.
    pub async fn insert(&self, book: &Book) -> DbResult<()> {
        debug!(id = %book.id, title = %book.title, "Inserting book");

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, price_cents, category, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price_cents)
        .bind(book.category.as_str())
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("{SELECT_BOOK} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Book::try_from).transpose()
    }

    /// Lists the whole catalog, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Book>> {
        let rows: Vec<BookRow> =
            sqlx::query_as(&format!("{SELECT_BOOK} ORDER BY created_at, id"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    /// Resolves an ordered, possibly-duplicated list of book ids.
    ///
    /// Returns one `Book` per requested id *occurrence*, in request order.
    /// Ids that do not resolve are silently dropped; callers detect loss by
    /// comparing the returned length with the requested length.
    pub async fn find_all_by_ids(&self, ids: &[String]) -> DbResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(requested = ids.len(), "Resolving book ids");

        // One IN query over the unique ids, then map the requested list
        // positionally so duplicates resolve independently.
        let mut unique: Vec<&String> = ids.iter().collect();
        unique.sort();
        unique.dedup();

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_BOOK);
        qb.push(" WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in &unique {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let rows: Vec<BookRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let mut by_id: HashMap<String, Book> = HashMap::with_capacity(rows.len());
        for row in rows {
            let book = Book::try_from(row)?;
            by_id.insert(book.id.clone(), book);
        }

        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    /// Updates a book's editable fields.
    pub async fn update(&self, book: &Book) -> DbResult<()> {
        debug!(id = %book.id, "Updating book");

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = ?2,
                author = ?3,
                price_cents = ?4,
                category = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price_cents)
        .bind(book.category.as_str())
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", &book.id));
        }

        Ok(())
    }

    /// Deletes a book from the catalog.
    ///
    /// Historical purchases keep their lines; only the catalog entry goes.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting book");

        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
