mod persistence;
mod preferences;

pub use persistence::{
    load_catalog, load_config, load_plan, save_catalog, save_plan, write_shopping_csv,
};
pub use preferences::PreferencesStore;
