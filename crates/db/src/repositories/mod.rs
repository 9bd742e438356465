//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and issue statements against a
//! single table (or one transaction where an invariant spans two statements).

pub mod auth_user_repo;
pub mod category_repo;
pub mod fabric_repo;
pub mod order_repo;
pub mod otp_repo;
pub mod product_image_repo;
pub mod product_repo;
pub mod profile_repo;
pub mod section_repo;
pub mod session_repo;
pub mod stats_repo;

pub use auth_user_repo::AuthUserRepo;
pub use category_repo::CategoryRepo;
pub use fabric_repo::FabricRepo;
pub use order_repo::OrderRepo;
pub use otp_repo::OtpRepo;
pub use product_image_repo::ProductImageRepo;
pub use product_repo::ProductRepo;
pub use profile_repo::ProfileRepo;
pub use section_repo::SectionRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
