pub mod activity;
pub mod dates;
pub mod matcher;
pub mod pipeline;
pub mod price;
pub mod schema;
pub mod sku;

pub use activity::{ActivityResolver, NOT_WEB};
pub use dates::{parse_date_window, DateWindow};
pub use matcher::{match_sku, MatchInput};
pub use pipeline::{reconcile, ReconcileConfig, ReconcileSummary, SourceRow};
pub use price::{parse_price_text, PricePair};
pub use schema::{OutputMode, SchemaVersion, SheetSchema};
pub use sku::{expand_skus, product_type_or_default};
