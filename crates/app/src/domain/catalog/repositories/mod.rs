//! Catalog Repositories

mod brands;
mod categories;
mod products;

pub(crate) use brands::PgBrandsRepository;
pub(crate) use categories::PgCategoriesRepository;
pub(crate) use products::PgProductsRepository;
