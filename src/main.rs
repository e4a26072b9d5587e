//! Local pipeline: pivot the three datasets from `data/` into
//! `data/Cleaned Pivots/`.

use anyhow::Result;
use labour_etl::logging::init_logging;
use labour_etl::pipeline::run_local;
use labour_etl::{EtlConfig, LocalStore};

fn main() -> Result<()> {
    init_logging();

    let store = LocalStore::default();
    run_local(&store, &EtlConfig::local()).into_result()?;

    println!("ETL completed → processed_NAICS/Monthly Vac/Quarterly Vac.parquet");
    Ok(())
}
