use eda_charts::models::{CategoryTable, FeatureFrame, mfcc_column};
use eda_charts::viz::util::{blank_cells, palette_colors};
use eda_charts::viz::{BarChartOptions, GridOptions, Palette, SingleBoxplotOptions};

fn counts_table() -> CategoryTable {
    CategoryTable::new(
        vec!["a".into(), "b".into(), "c".into()],
        vec!["x".into(), "y".into(), "z".into()],
        vec![
            vec![2.0, 3.0, 5.0],
            vec![1.0, 0.0, 1.0],
            vec![0.0, 0.0, 0.0],
        ],
    )
    .unwrap()
}

#[test]
fn proportions_sum_to_one_for_nonzero_rows() {
    let table = counts_table();
    for row in 0..2 {
        let shares = table.row_proportions(row).unwrap();
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
    // zero-total row has no proportions
    assert!(table.row_proportions(2).is_none());
}

#[test]
fn one_palette_entry_per_column() {
    let table = counts_table();
    let (_, ncols) = table.shape();
    for palette in [
        Palette::Tab10,
        Palette::Tab20,
        Palette::Pastel1,
        Palette::Office,
    ] {
        assert_eq!(palette_colors(palette, ncols).len(), ncols);
    }
    assert_eq!(palette_colors(Palette::Tab20, 25).len(), 25);
}

#[test]
fn auto_height_grows_with_legend() {
    let opts = BarChartOptions {
        auto_height_by_legend: true,
        figsize: (1000, 600),
        legend_item_height: 25,
        ..BarChartOptions::default()
    };
    // 20 entries fit under the base height; 30 do not
    assert_eq!(opts.resolved_figsize(20), (1000, 600));
    assert_eq!(opts.resolved_figsize(30), (1000, 750));

    let fixed = BarChartOptions {
        auto_height_by_legend: false,
        ..opts
    };
    assert_eq!(fixed.resolved_figsize(30), (1000, 600));
}

#[test]
fn blank_cell_arithmetic() {
    assert_eq!(blank_cells(3, 3, 7), 2);
    assert_eq!(blank_cells(2, 2, 4), 0);
    assert_eq!(blank_cells(1, 2, 5), 0); // overfull grids are caught elsewhere
}

#[test]
fn single_boxplot_title_defaults_to_feature_by_label() {
    let opts = SingleBoxplotOptions::default();
    assert_eq!(opts.resolved_title("mfcc_3_mean"), "mfcc_3_mean by label");

    let named = SingleBoxplotOptions {
        title: Some("spread".into()),
        ..SingleBoxplotOptions::default()
    };
    assert_eq!(named.resolved_title("mfcc_3_mean"), "spread");
}

#[test]
fn grid_suptitle_default() {
    assert_eq!(
        GridOptions::default().resolved_suptitle(),
        "MFCC Feature Boxplots"
    );
}

#[test]
fn mfcc_naming_contract() {
    assert_eq!(mfcc_column(13, "mean"), "mfcc_13_mean");
    assert_eq!(mfcc_column(2, "var"), "mfcc_2_var");
}

#[test]
fn category_table_serde_round_trip() {
    let table = counts_table().with_column_axis_name("genre");
    let json = serde_json::to_string(&table).unwrap();
    let back: CategoryTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
    assert_eq!(back.column_axis_name(), Some("genre"));
}

#[test]
fn feature_frame_lookup_and_shape() {
    let mut frame = FeatureFrame::new();
    frame
        .push_numeric("mfcc_1_mean", vec![1.0, 2.0, 3.0])
        .unwrap();
    frame
        .push_labels(
            "emotion_pair",
            vec!["a".into(), "b".into(), "a".into()],
        )
        .unwrap();
    assert_eq!(frame.len(), 3);
    assert_eq!(frame.numeric_column("mfcc_1_mean"), Some(&[1.0, 2.0, 3.0][..]));
    assert!(frame.numeric_column("mfcc_2_mean").is_none());
    assert_eq!(frame.numeric_names().collect::<Vec<_>>(), ["mfcc_1_mean"]);

    let groups = frame.group_values("mfcc_1_mean", "emotion_pair").unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0], ("a".to_string(), vec![1.0, 3.0]));
}
