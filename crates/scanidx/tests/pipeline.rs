//! Integration tests for the end-to-end analyses.

use approx::assert_relative_eq;
use scanidx::growth::{Classification, Grouping, GrowthType, ObservationFilter};
use scanidx::{
    AnalysisConfig, ScanIdxError, analyze_growth, analyze_trends, compare_sources, load_sources,
    load_turnover,
};
use std::io::Write;
use std::path::PathBuf;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("scanidx_pipeline_{name}.csv"));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_compare_from_files() {
    let scanner = write_temp(
        "scanner",
        "Indeks Riil\n(miliar rupiah)\nPeriode,Jan-22,Feb-22,Jan-23,Feb-23\n\
         Minuman,100,100,110,120\n\
         Tembakau,80,120,90,100\n",
    );
    let published = write_temp(
        "published",
        "Indeks Penjualan Riil,Jan-22,Feb-22,Jan-23,Feb-23\n\
         Minuman,99.0,101.0,108.0,119.0\n\
         Tembakau,100.0,,105.0,110.0\n",
    );

    let config = AnalysisConfig::default();
    let (scanner_table, published_table) = load_sources(&scanner, &published, &config).unwrap();
    let comparison = compare_sources(&scanner_table, &published_table, &config).unwrap();

    assert_eq!(comparison.base_year, 2022);
    assert_eq!(comparison.diagnostics.matched, 4);
    assert_eq!(comparison.diagnostics.scanner_only, 4);
    assert_eq!(comparison.table.entities(), ["Minuman"]);
    assert!(comparison.table.correlation("Minuman").unwrap() > 0.9);

    std::fs::remove_file(&scanner).ok();
    std::fs::remove_file(&published).ok();
}

#[test]
fn test_text_placeholder_removes_published_entity() {
    let scanner = write_temp(
        "scanner_placeholder",
        "Indeks Riil\n(miliar rupiah)\nPeriode,Jan-22,Jan-23\n\
         Minuman,100,110\n\
         Tembakau,80,90\n",
    );
    let published = write_temp(
        "published_placeholder",
        "Indeks Penjualan Riil,Jan-22,Jan-23\n\
         Minuman,100.0,108.0\n\
         Tembakau,100.0,-\n",
    );

    let config = AnalysisConfig::default();
    let (scanner_table, published_table) = load_sources(&scanner, &published, &config).unwrap();
    let comparison = compare_sources(&scanner_table, &published_table, &config).unwrap();

    assert_eq!(comparison.table.entities(), ["Minuman"]);
    assert_eq!(comparison.diagnostics.matched, 2);
    assert_eq!(comparison.diagnostics.scanner_only, 2);

    std::fs::remove_file(&scanner).ok();
    std::fs::remove_file(&published).ok();
}

#[test]
fn test_growth_from_file() {
    let path = write_temp(
        "turnover",
        "tahun,bulan,kategori,subkategori,klasifikasi,total_expenditure,total_quantity\n\
         2023,6,\"Makanan, minuman dan tembakau\",Minuman,SPE,100,10\n\
         2024,6,\"Makanan, minuman dan tembakau\",Minuman,SPE,150,12\n\
         2024,6,\"Makanan, minuman dan tembakau\",Minuman,Non-SPE,50,5\n\
         2023,6,Barang Lainnya,Farmasi,Non-SPE,200,4\n\
         2024,6,Barang Lainnya,Farmasi,Non-SPE,180,3\n\
         2024,6,Barang Budaya dan Rekreasi,Alat Musik,SPE,999,1\n",
    );

    let config = AnalysisConfig::default();
    let ingested = load_turnover(&path, &config).unwrap();
    assert_eq!(ingested.report.excluded, 1);

    let summary = analyze_growth(
        &ingested.observations,
        &ObservationFilter::new(),
        Grouping::Subcategory,
        GrowthType::Yoy,
        &config,
    )
    .unwrap()
    .summary();

    assert_eq!(summary.best.entity, "Minuman");
    assert_relative_eq!(summary.best.value, 100.0);
    assert_eq!(summary.ranked[1].0, "Farmasi");
    assert_relative_eq!(summary.ranked[1].1.unwrap(), -10.0);

    let food = &summary.headlines[0];
    assert_relative_eq!(food.total, 200.0);
    assert_relative_eq!(food.spe_share.unwrap(), 75.0);
    assert_relative_eq!(food.yoy_change.unwrap(), 100.0);

    let spe_only = analyze_growth(
        &ingested.observations,
        &ObservationFilter::new().with_classifications([Classification::Spe]),
        Grouping::Subcategory,
        GrowthType::Yoy,
        &config,
    )
    .unwrap()
    .summary();
    assert_relative_eq!(spe_only.best.value, 50.0);

    let trends = analyze_trends(
        &ingested.observations,
        &ObservationFilter::new(),
        Grouping::Category,
    )
    .unwrap();
    assert_eq!(trends.len(), 4);
    assert_eq!(trends[1].key, "Barang Lainnya");
    assert_relative_eq!(trends[1].normalized.unwrap(), 0.9);
    assert_relative_eq!(trends[3].normalized.unwrap(), 2.0);

    let none = analyze_trends(
        &ingested.observations,
        &ObservationFilter::new().with_years(2019, 2020),
        Grouping::Category,
    );
    assert!(matches!(none, Err(ScanIdxError::NoObservations)));

    std::fs::remove_file(&path).ok();
}
