use anyhow::Context;
use clap::{Parser, Subcommand};
use frost_normals::{
    convert_json_to_sql, FrostTool, FrostToolConfig, NormalsDownloader, DEFAULT_CONCURRENCY,
    DEFAULT_OUTPUT_DIR, FROST_LOOKUP_TABLE, NORMALS_LISTING_URL, SQL_FILE_NAME,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frost-normals", author, version, about = "ZIP code frost dates and growing season from NOAA normals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the ZIP frost lookup table and write CSV, JSON and SQL exports
    Build {
        /// Combined station normals CSV
        #[arg(long, default_value = "data_raw/frost_data_raw.csv")]
        station_normals: PathBuf,
        /// Census Gazetteer ZCTA file (tab separated)
        #[arg(long, default_value = "data_raw/2021_Gaz_zcta_national.txt")]
        zip_centroids: PathBuf,
        /// Daily minimum temperature normals CSV
        #[arg(long, default_value = "data_built/daily_normals.csv")]
        daily_normals: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
    /// Download the per-station annual/seasonal normals into one CSV
    Download {
        #[arg(long, default_value = "data_raw/frost_data_raw.csv")]
        output: PathBuf,
        #[arg(long, default_value = NORMALS_LISTING_URL)]
        listing_url: String,
        /// Station files fetched at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
    /// Convert a JSON records export into INSERT statements
    Sql {
        #[arg(long, default_value = "data_output/frost_tool_dict.json")]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = FROST_LOOKUP_TABLE)]
        table: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            station_normals,
            zip_centroids,
            daily_normals,
            output_dir,
        } => {
            let config = FrostToolConfig::builder()
                .station_normals(station_normals)
                .zip_centroids(zip_centroids)
                .daily_normals(daily_normals)
                .output_dir(output_dir)
                .build();
            let report = FrostTool::new(config)
                .run()
                .await
                .context("Failed to build the frost lookup table")?;
            println!(
                "{} ZIP codes written ({} excluded, {} station rows dropped)",
                report.profiles, report.excluded_zipcodes, report.dropped_station_rows
            );
            println!("  {}", report.outputs.csv.display());
            println!("  {}", report.outputs.json.display());
            println!("  {}", report.outputs.sql.display());
        }
        Commands::Download {
            output,
            listing_url,
            concurrency,
        } => {
            let downloader = NormalsDownloader::builder()
                .base_url(listing_url)
                .concurrency(concurrency)
                .build()?;
            let summary = downloader
                .download_to(&output)
                .await
                .context("Failed to download station normals")?;
            println!(
                "{} station rows written from {} files ({} failed)",
                summary.rows_written,
                summary.files_listed - summary.files_failed,
                summary.files_failed
            );
        }
        Commands::Sql {
            input,
            output,
            table,
        } => {
            let output = output.unwrap_or_else(|| {
                input
                    .parent()
                    .map(|dir| dir.join(SQL_FILE_NAME))
                    .unwrap_or_else(|| PathBuf::from(SQL_FILE_NAME))
            });
            let count = convert_json_to_sql(&input, &output, &table)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            info!("Converted {} into {}", input.display(), output.display());
            println!("{} insert statements written to {}", count, output.display());
        }
    }
    Ok(())
}
