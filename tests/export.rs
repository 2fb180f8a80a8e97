mod common;

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use common::{LISTINGS_CSV, two_cranes};
use crane_listings::{
    criteria::Criteria,
    data::{Dataset, Value},
    export::{self, SHEET_NAME},
    load, pipeline,
};
use encoding_rs::UTF_8;

fn filtered_listings() -> Dataset {
    let raw = load::parse_csv(LISTINGS_CSV.as_bytes(), UTF_8).expect("parse listings");
    let criteria = Criteria {
        location: Some("tx".into()),
        ..Criteria::default()
    };
    pipeline::run(raw, &criteria).expect("run pipeline").filtered
}

#[test]
fn csv_export_round_trips_filtered_records() {
    let filtered = filtered_listings();
    assert_eq!(filtered.len(), 2);

    let bytes = export::to_csv_bytes(&filtered).expect("csv export");
    let reparsed = load::parse_csv(&bytes, UTF_8).expect("reparse export");

    assert_eq!(reparsed.columns(), filtered.columns());
    assert_eq!(reparsed.len(), filtered.len());
    for (original, copy) in filtered.rows().iter().zip(reparsed.rows()) {
        let original = original.iter().map(Value::as_display).collect::<Vec<_>>();
        let copy = copy.iter().map(Value::as_display).collect::<Vec<_>>();
        assert_eq!(original, copy);
    }
}

#[test]
fn csv_export_renders_coerced_prices_without_fraction() {
    let prepared = pipeline::prepare(two_cranes());
    let csv = String::from_utf8(export::to_csv_bytes(&prepared).expect("csv export"))
        .expect("utf8 export");
    assert_eq!(
        csv,
        "title,condition,crane type,price\nCrane A,Used,Crawler,10000\nCrane B,New,Tower,25000\n"
    );
}

#[test]
fn xlsx_export_writes_single_listings_sheet() {
    let filtered = filtered_listings();
    let bytes = export::to_xlsx_bytes(&filtered).expect("xlsx export");

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open xlsx");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

    let range = workbook.worksheet_range(SHEET_NAME).expect("sheet range");
    let rows = range.rows().collect::<Vec<_>>();
    assert_eq!(rows.len(), filtered.len() + 1);

    let header = rows[0]
        .iter()
        .map(|cell| match cell {
            Data::String(s) => s.clone(),
            other => panic!("unexpected header cell {other:?}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(header, ["title", "location", "condition", "crane type", "price"]);

    assert_eq!(rows[1][0], Data::String("Grove RT890E Rough Terrain".into()));
    assert_eq!(rows[1][4], Data::Float(450000.0));
    // Terex row has no condition.
    assert_eq!(rows[2][2], Data::Empty);
    assert_eq!(rows[2][4], Data::Float(310500.0));
}

#[test]
fn empty_dataset_exports_header_only_workbook() {
    let empty = Dataset::new(vec!["title".into(), "price".into()], Vec::new());
    let bytes = export::to_xlsx_bytes(&empty).expect("xlsx export");
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open xlsx");
    let range = workbook.worksheet_range(SHEET_NAME).expect("sheet range");
    assert_eq!(range.rows().count(), 1);
}
