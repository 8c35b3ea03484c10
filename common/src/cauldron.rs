//! Котёл: общий бонус, делится по сменам между всеми, кроме стажёров

use crate::compensation::Parmaster;
use rust_decimal::Decimal;

/// Стоимость одной смены в котле: сумма / смены всех не-стажёров
pub fn cauldron_unit(total: Decimal, parmasters: &[Parmaster<'_>]) -> Decimal {
    let shifts = parmasters
        .iter()
        .filter(|p| !p.rank.is_intern())
        .fold(0u32, |acc, p| acc.saturating_add(p.shifts));

    if shifts == 0 {
        tracing::warn!("нет смен у пармастеров, котёл не делится");
        return Decimal::ZERO;
    }
    total / Decimal::from(shifts)
}

/// Доля котла сотрудника
pub fn cauldron_share(unit: Decimal, parmaster: &Parmaster<'_>) -> Decimal {
    if parmaster.rank.is_intern() {
        Decimal::ZERO
    } else {
        unit * parmaster.procedure_percentage()
    }
}
