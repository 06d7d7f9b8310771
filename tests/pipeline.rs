use frost_normals::{
    read_json_records, read_profiles_csv, read_profiles_json, FrostTool, FrostToolConfig,
    FrostToolError, LoadError, ZipFrostProfile, PROFILE_COLUMNS,
};
use std::path::Path;

const STATIONS: &str = "\
STATION,LATITUDE,LONGITUDE,ELEVATION,NAME,meas_flag_ANN-TMIN-PRBLST-T32FP30,ANN-TMIN-PRBLST-T32FP30,meas_flag_ANN-TMIN-PRBFST-T32FP30,ANN-TMIN-PRBFST-T32FP30,ANN-TAVG-NORMAL
USW00014922,45.0,-93.0,264.0,\"MINNEAPOLIS, MN US\",V,-9999,V,-9999,45.0
USW00012916,30.0,-90.0,1.0,\"NEW ORLEANS, LA US\",,-9999,,-9999,60.0
USW00014842,40.0,-89.0,199.0,\"PEORIA, IL US\",, 04/10,, 10/20,52.0
RQC00660061,18.2,-66.7,549.9,\"ADJUNTAS SUBSTN, PR US\",,-9999,,-9999,78.0
USC00000000,35.0,-100.0,null,\"NOWHERE, TX US\",,04/01,,11/01,null
";

const ZIPS: &str = "\
GEOID\tALAND\tAWATER\tINTPTLAT\tINTPTLONG                 
55401\t1000\t0\t45.0\t-93.1
70112\t1000\t0\t30.0\t-90.0
61602\t1000\t0\t40.1\t-89.0
601\t1000\t0\t18.2\t-66.7
";

/// A year of daily minima; every day is warm at the tropical station.
fn daily_normals() -> String {
    let days_in_month = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut body = String::from("GHCN_ID,month,day,DLY-TMIN-NORMAL\n");
    for (m, days) in days_in_month.iter().enumerate() {
        for day in 1..=*days {
            body.push_str(&format!("RQC00660061,{},{},64.5\n", m + 1, day));
            let peoria = if (4..=10).contains(&(m + 1)) { 45.0 } else { 20.0 };
            body.push_str(&format!("USW00014842,{},{},{}\n", m + 1, day, peoria));
        }
    }
    body
}

fn write_inputs(dir: &Path) -> FrostToolConfig {
    std::fs::write(dir.join("frost_data_raw.csv"), STATIONS).unwrap();
    std::fs::write(dir.join("2021_Gaz_zcta_national.txt"), ZIPS).unwrap();
    std::fs::write(dir.join("dly-temp-normal.csv"), daily_normals()).unwrap();
    FrostToolConfig::builder()
        .station_normals(dir.join("frost_data_raw.csv"))
        .zip_centroids(dir.join("2021_Gaz_zcta_national.txt"))
        .daily_normals(dir.join("dly-temp-normal.csv"))
        .output_dir(dir.join("data_output"))
        .build()
}

fn profile(zipcode: &str) -> impl Fn(&&ZipFrostProfile) -> bool + '_ {
    move |p| p.zipcode == zipcode
}

#[tokio::test]
async fn test_build_writes_all_exports() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path());
    let report = FrostTool::new(config).run().await.unwrap();

    assert_eq!(report.profiles, 4);
    assert_eq!(report.excluded_zipcodes, 0);
    assert_eq!(report.dropped_station_rows, 1);

    let from_csv = read_profiles_csv(&report.outputs.csv).unwrap();
    let from_json = read_profiles_json(&report.outputs.json).unwrap();
    assert_eq!(from_csv, from_json);

    let zipcodes: Vec<&str> = from_csv.iter().map(|p| p.zipcode.as_str()).collect();
    assert_eq!(zipcodes, vec!["00601", "55401", "61602", "70112"]);
    assert!(from_csv.iter().all(|p| p.growing_days <= 365));

    // Every daily minimum is above freezing here, and the sentinel dates
    // still resolve through the temperature tag.
    let tropical = from_csv.iter().find(profile("00601")).unwrap();
    assert_eq!(tropical.station_name, "ADJUNTAS SUBSTN");
    assert_eq!(tropical.state_province, "PR");
    assert_eq!(tropical.station_altitude, 1804);
    assert_eq!(tropical.station_distance_miles, 0.0);
    assert_eq!(tropical.last_freeze, "infrequent frost");
    assert_eq!(tropical.first_freeze, "infrequent frost");
    assert_eq!(tropical.growing_days, 365);

    let cold = from_csv.iter().find(profile("55401")).unwrap();
    assert_eq!(cold.station_name, "MINNEAPOLIS");
    assert_eq!(cold.state_province, "MN");
    assert_eq!(cold.country, "US");
    assert_eq!(cold.station_altitude, 866);
    assert_eq!(cold.station_distance_miles, 5.5);
    assert_eq!(cold.last_freeze, "year-round risk");
    assert_eq!(cold.first_freeze, "year-round risk");
    assert_eq!(cold.growing_days, 0);

    let seasonal = from_csv.iter().find(profile("61602")).unwrap();
    assert_eq!(seasonal.last_freeze, "April 10");
    assert_eq!(seasonal.first_freeze, "October 20");
    assert_eq!(seasonal.growing_days, 193);
    assert_eq!(seasonal.station_distance_miles, 6.9);

    let warm = from_csv.iter().find(profile("70112")).unwrap();
    assert_eq!(warm.last_freeze, "infrequent frost");
    assert_eq!(warm.growing_days, 365);
    assert_eq!(warm.station_altitude, 3);
    assert_eq!(warm.station_distance_miles, 0.0);
}

#[tokio::test]
async fn test_json_keys_follow_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let report = FrostTool::new(write_inputs(dir.path())).run().await.unwrap();

    let records = read_json_records(&report.outputs.json).unwrap();
    assert_eq!(records.len(), 4);
    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
    assert_eq!(keys, PROFILE_COLUMNS);

    let sql = std::fs::read_to_string(&report.outputs.sql).unwrap();
    let statements: Vec<&str> = sql.lines().collect();
    assert_eq!(statements.len(), 4);
    assert!(statements[0].starts_with("INSERT INTO zip_frost_lookup (zipcode, state_province,"));
    assert!(statements[0].ends_with("'infrequent frost', 'infrequent frost', '365');"));
    assert!(statements[1].ends_with("'year-round risk', 'year-round risk', '0');"));
}

#[tokio::test]
async fn test_missing_input_column_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path());
    std::fs::write(
        dir.path().join("dly-temp-normal.csv"),
        "GHCN_ID,month,day\nRQC00660061,1,1\n",
    )
    .unwrap();

    let err = FrostTool::new(config).run().await.unwrap_err();
    assert!(matches!(
        err,
        FrostToolError::Load(LoadError::MissingColumn { ref column, .. }) if column == "DLY-TMIN-NORMAL"
    ));
    assert!(!dir.path().join("data_output").exists());
}
