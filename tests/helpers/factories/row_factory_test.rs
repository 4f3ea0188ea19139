use crate::engine::decimal::Decimal128;
use crate::engine::types::ScalarValue;
use crate::test_helpers::factories::RowFactory;
use crate::test_helpers::factory::Factory;

#[test]
fn test_row_factory() {
    let row = Factory::row()
        .with(5i64)
        .with_null()
        .with("east")
        .with_decimal(150, 2)
        .create();

    assert_eq!(
        row,
        vec![
            ScalarValue::Int64(5),
            ScalarValue::Null,
            ScalarValue::Utf8("east".into()),
            ScalarValue::Decimal {
                value: Decimal128::new(150),
                precision: 2
            },
        ]
    );
}

#[test]
fn test_mixed_list_is_deterministic() {
    let a = RowFactory::create_mixed_list(64, 4, 7);
    let b = RowFactory::create_mixed_list(64, 4, 7);
    assert_eq!(a, b);
    assert!(a.iter().all(|row| row.len() == 4));
    assert!(a.iter().any(|row| row.iter().any(ScalarValue::is_null)));
}
