//! Разбор листов выгрузки в записи
//!
//! ## Листы
//! - авторские процедуры: категория задаётся строкой-заголовком и действует
//!   до следующей непустой категории
//! - коллективные процедуры: группа открывается строкой с «Русская»/«Хаммам»
//!   и сбрасывается в результат только при появлении следующей группы
//! - табель: смены считаются между строками «Пармастер» и
//!   «Системный администратор»
//! - сводка: итог по строке «Итого»

use crate::schema::{AuthoredRow, CollectiveRow, StaffingRow, SummaryRow};
use crate::types::{
    AuthoredCategory, AuthoredProcedures, AuthoredRecord, CollectiveEntry, CollectiveProcedures,
    ProcedureGroup, ShiftTally, GROUP_MARKERS,
};
use rust_decimal::{Decimal, RoundingStrategy};

/// Роль, с которой начинается блок пармастеров в табеле
pub const STAFF_ROLE_MARKER: &str = "Пармастер";
/// Роль, на которой блок пармастеров заканчивается
pub const SYSTEM_ROLE_MARKER: &str = "Системный администратор";
/// Метка итоговой строки сводного листа
pub const TOTAL_LABEL: &str = "Итого";

/// Авторские процедуры по категориям
pub fn extract_authored(rows: &[AuthoredRow]) -> AuthoredProcedures {
    let mut procedures: AuthoredProcedures = AuthoredCategory::ALL
        .into_iter()
        .map(|c| (c, Vec::new()))
        .collect();
    let mut current: Option<String> = None;

    for row in rows {
        if let Some(category) = &row.category {
            current = Some(category.clone());
        }

        let Some(quantity) = row.quantity.whole_quantity() else {
            continue;
        };
        let Some(name) = &row.name else {
            continue;
        };
        let Some(category) = current.as_deref().and_then(AuthoredCategory::from_label) else {
            tracing::debug!("авторская процедура вне категории пропущена: {}", name);
            continue;
        };

        let price = match row.price.decimal() {
            Some(price) => price.trunc(),
            None => {
                tracing::warn!("нет цены у авторской процедуры {} ({}), считаем 0", name, category.label());
                Decimal::ZERO
            }
        };
        let computed_value = (price * category.factor())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        procedures.entry(category).or_default().push(AuthoredRecord {
            staff_name: name.clone(),
            quantity,
            computed_value,
        });
    }

    procedures
}

fn is_group_header(label: &str) -> bool {
    GROUP_MARKERS.iter().any(|marker| label.contains(marker))
}

fn collective_entry(row: &CollectiveRow) -> Option<CollectiveEntry> {
    let name = row.name.as_ref()?;
    if row.quantity.whole_quantity().is_none() && !row.quantity.is_empty() {
        tracing::warn!("нечисловое количество у {}: {:?}, считаем 0", name, row.quantity);
    }
    Some(CollectiveEntry::new(name.clone(), row.quantity.quantity_or_zero()))
}

/// Коллективные процедуры по группам.
///
/// Группа попадает в результат только когда встречен следующий заголовок:
/// записи после последнего заголовка отбрасываются, даже если ниже есть
/// строка с другой подписью (например «Итого»): она считается обычной строкой
/// группы, а не сохраняет её.
// TODO: уточнить у бухгалтерии, учитывать ли хвост, закрытый строкой «Итого»
pub fn extract_collective(rows: &[CollectiveRow]) -> CollectiveProcedures {
    let mut procedures = CollectiveProcedures::new();
    let mut current: Option<String> = None;
    let mut pending: Vec<CollectiveEntry> = Vec::new();

    for row in rows {
        match &row.category {
            Some(label) if is_group_header(label) => {
                let finished = ProcedureGroup::from(current.take());
                procedures.insert(finished, std::mem::take(&mut pending));
                current = Some(label.clone());
            }
            Some(_) => pending.extend(collective_entry(row)),
            None => {
                if current.is_some() {
                    pending.extend(collective_entry(row));
                }
            }
        }
    }

    if !pending.is_empty() {
        tracing::warn!(
            "группа {:?} без завершающего заголовка не учтена ({} записей)",
            current,
            pending.len()
        );
    }

    procedures.retain_non_empty();
    procedures
}

/// Строки ростера: в строке есть и имя, и количество
pub fn roster_rows(rows: &[CollectiveRow]) -> Vec<&CollectiveRow> {
    rows.iter()
        .filter(|row| row.name.is_some() && !row.quantity.is_empty())
        .collect()
}

/// Количество смен по табелю
pub fn extract_shift_tally(rows: &[StaffingRow]) -> ShiftTally {
    let mut tally = ShiftTally::new();
    let mut in_staff_block = false;

    for row in rows {
        let role = row.role.as_deref();
        if role == Some(STAFF_ROLE_MARKER) {
            in_staff_block = true;
        }
        if !in_staff_block {
            continue;
        }
        if role == Some(SYSTEM_ROLE_MARKER) {
            break;
        }

        let Some(key) = &row.name_key else {
            continue;
        };
        for _ in row.shift_marks.iter().filter(|mark| !mark.is_empty()) {
            tally.add(key);
        }
    }

    tally
}

/// Сумма котла из строки «Итого»
pub fn extract_reported_total(rows: &[SummaryRow]) -> Option<Decimal> {
    rows.iter()
        .find(|row| row.label.as_deref() == Some(TOTAL_LABEL))
        .and_then(|row| row.total.decimal())
}
