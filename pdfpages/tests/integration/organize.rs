//! Page-order editing and the organize operation.

use pdfpages::error::PdfPagesError;
use pdfpages::ops::{Operation, OperationOutput, OrganizeStep, organize_pages};
use pdfpages::pages::{PageOrder, PageOrderMode};
use pdfpages::{PageGeometry, rebuild};

use crate::common::{letter_document, page_labels};

#[test]
fn test_page_order_edits_drive_output() {
    let source = letter_document(4);
    let mut order = PageOrder::new(source.page_count(), PageOrderMode::Organize).unwrap();

    let first = order.id_at(0).cloned().unwrap();
    let third = order.id_at(2).cloned().unwrap();
    let last = order.id_at(3).cloned().unwrap();

    assert!(order.reorder(&last, &first));
    let copy = order.duplicate(&first).unwrap();
    assert!(copy.is_some());
    assert!(order.delete(&third).unwrap());

    assert_eq!(order.to_output_order(), [3, 0, 0, 1]);
    let organized = organize_pages(&source, &order).unwrap();
    assert_eq!(
        page_labels(&organized),
        ["Page 4", "Page 1", "Page 1", "Page 2"]
    );
}

#[test]
fn test_display_numbers_follow_edits() {
    let mut order = PageOrder::new(3, PageOrderMode::Organize).unwrap();
    let second = order.id_at(1).cloned().unwrap();
    order.delete(&second).unwrap();

    let numbers: Vec<usize> = order.pages().iter().map(|p| p.display_number()).collect();
    assert_eq!(numbers, [1, 2]);
}

#[test]
fn test_reorder_only_mode_rejects_duplicates() {
    let mut order = PageOrder::new(2, PageOrderMode::ReorderOnly).unwrap();
    let first = order.id_at(0).cloned().unwrap();

    assert!(matches!(
        order.duplicate(&first),
        Err(PdfPagesError::DuplicationDisabled)
    ));
    assert_eq!(order.len(), 2);
}

#[test]
fn test_last_page_cannot_be_deleted() {
    let mut order = PageOrder::new(1, PageOrderMode::Organize).unwrap();
    let only = order.id_at(0).cloned().unwrap();

    assert!(matches!(
        order.delete(&only),
        Err(PdfPagesError::CannotDeleteLastPage)
    ));
}

#[test]
fn test_organize_operation_steps() {
    let operation = Operation::Organize {
        steps: vec![
            OrganizeStep::Move { from: 3, to: 1 },
            OrganizeStep::Delete(2),
            OrganizeStep::Duplicate(1),
        ],
        mode: PageOrderMode::Organize,
    };

    let OperationOutput::Document(doc) = operation.apply(letter_document(3)).unwrap() else {
        panic!("organize should produce one document");
    };
    assert_eq!(page_labels(&doc), ["Page 3", "Page 3", "Page 2"]);
}

#[test]
fn test_rebuild_rejects_bad_orders() {
    let source = letter_document(2);

    assert!(matches!(
        rebuild(&source, &[]),
        Err(PdfPagesError::EmptyPageOrder)
    ));
    assert!(matches!(
        rebuild(&source, &[0, 2]),
        Err(PdfPagesError::InvalidPageIndex {
            index: 2,
            page_count: 2
        })
    ));
}
