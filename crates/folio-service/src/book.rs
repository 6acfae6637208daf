//! # Book Service
//!
//! Catalog CRUD. Thin on purpose: validate, resolve, act.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use folio_core::validation::{validate_author, validate_price_cents, validate_title};
use folio_core::{Book, BookCategory};
use folio_db::Database;

/// Catalog operations.
#[derive(Debug, Clone)]
pub struct BookService {
    db: Database,
}

impl BookService {
    /// Creates a new BookService.
    pub fn new(db: Database) -> Self {
        BookService { db }
    }

    /// Lists the whole catalog.
    pub async fn list_books(&self) -> ServiceResult<Vec<Book>> {
        Ok(self.db.books().list_all().await?)
    }

    /// Gets a book by id.
    pub async fn get_book(&self, id: &str) -> ServiceResult<Book> {
        self.db
            .books()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::BookNotFound(id.to_string()))
    }

    /// Adds a book to the catalog.
    pub async fn create_book(
        &self,
        title: &str,
        author: &str,
        price_cents: i64,
        category: BookCategory,
    ) -> ServiceResult<Book> {
        validate_title(title)?;
        validate_author(author)?;
        validate_price_cents(price_cents)?;

        let book = Book::new(
            Uuid::new_v4().to_string(),
            title.trim(),
            author.trim(),
            price_cents,
            category,
        );

        self.db.books().insert(&book).await?;

        info!(book_id = %book.id, title = %book.title, "Book created");

        Ok(book)
    }

    /// Updates a book's title, author, price, and category.
    ///
    /// Existing purchases keep the totals they were recorded with; a price
    /// or category edit only affects purchases written afterwards.
    pub async fn update_book(
        &self,
        id: &str,
        title: &str,
        author: &str,
        price_cents: i64,
        category: BookCategory,
    ) -> ServiceResult<Book> {
        validate_title(title)?;
        validate_author(author)?;
        validate_price_cents(price_cents)?;

        let mut book = self.get_book(id).await?;

        book.title = title.trim().to_string();
        book.author = author.trim().to_string();
        book.price_cents = price_cents;
        book.category = category;
        book.updated_at = Utc::now();

        self.db.books().update(&book).await?;

        debug!(book_id = %book.id, "Book updated");

        Ok(book)
    }

    /// Removes a book from the catalog.
    ///
    /// Purchases that reference it are left untouched.
    pub async fn delete_book(&self, id: &str) -> ServiceResult<()> {
        let book = self.get_book(id).await?;

        self.db.books().delete(&book.id).await?;

        info!(book_id = %book.id, "Book deleted");

        Ok(())
    }
}
