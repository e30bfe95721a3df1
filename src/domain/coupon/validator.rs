//! Coupon business rules.
//!
//! Each rule is a free function that either hands its input back or fails
//! with a typed [`CouponError`], so use cases chain them with `?` or
//! `and_then`. Rules never touch shared state; the current instant is
//! passed in.

use crate::domain::foundation::{CouponId, Timestamp};
use crate::ports::CouponRepository;

use super::{Coupon, CouponDraft, CouponError};

/// Checks a creation candidate.
///
/// Order: required fields (all reported at once), expiration in the
/// future, then the discount rules.
pub fn validate_create(draft: CouponDraft, now: Timestamp) -> Result<CouponDraft, CouponError> {
    ensure_required_fields(draft)
        .and_then(|draft| ensure_expiration_in_future(draft, now))
        .and_then(ensure_discount_rules)
}

/// Checks an update candidate. Expiration is left to the caller, which only
/// enforces it when activating.
pub fn validate_update(draft: CouponDraft) -> Result<CouponDraft, CouponError> {
    ensure_required_fields(draft).and_then(ensure_discount_rules)
}

/// Requires an id to be present.
pub fn validate_coupon_id(id: Option<CouponId>) -> Result<CouponId, CouponError> {
    id.ok_or(CouponError::NotFound(None))
}

/// Rejects a candidate whose code is already taken by a stored coupon.
pub async fn validate_coupon_code(
    repository: &dyn CouponRepository,
    draft: CouponDraft,
) -> Result<CouponDraft, CouponError> {
    let Some(code) = draft.code.clone() else {
        return Ok(draft);
    };

    match repository.find_by_code(&code).await? {
        Some(_) => Err(CouponError::code_already_exists(code)),
        None => Ok(draft),
    }
}

fn ensure_required_fields(draft: CouponDraft) -> Result<CouponDraft, CouponError> {
    let empty = draft.empty_fields();
    if empty.is_empty() {
        Ok(draft)
    } else {
        Err(CouponError::field_cannot_be_empty(empty))
    }
}

fn ensure_expiration_in_future(
    draft: CouponDraft,
    now: Timestamp,
) -> Result<CouponDraft, CouponError> {
    match draft.expiration_date {
        Some(expiration) if !expiration.is_after(&now) => {
            Err(CouponError::ExpirationDateLessThanCurrentDate(draft.id))
        }
        _ => Ok(draft),
    }
}

fn ensure_discount_rules(draft: CouponDraft) -> Result<CouponDraft, CouponError> {
    if draft.discount_value.is_none() && draft.discount_percentage.is_none() {
        return Err(CouponError::DiscountFieldMustBeInformed);
    }
    if draft.discount_percentage.is_some_and(|p| p < 0.0) {
        return Err(CouponError::DiscountPercentageLessThanZero);
    }
    if draft.discount_value.is_some_and(|v| v < 0.0) {
        return Err(CouponError::DiscountValueLessThanZero);
    }
    Ok(draft)
}

/// Fails with `Expired` if the coupon is flagged expired or past its date.
pub fn ensure_not_expired(coupon: Coupon, now: Timestamp) -> Result<Coupon, CouponError> {
    if coupon.is_expired(now) {
        Err(CouponError::Expired(coupon.id))
    } else {
        Ok(coupon)
    }
}

/// Fails with `Invalid` if the coupon is inactive.
pub fn ensure_active(coupon: Coupon) -> Result<Coupon, CouponError> {
    if coupon.is_inactive() {
        Err(CouponError::Invalid(coupon.id))
    } else {
        Ok(coupon)
    }
}

/// Fails with `UsageLimitReached` if no uses remain.
pub fn ensure_has_available_uses(coupon: Coupon) -> Result<Coupon, CouponError> {
    if coupon.has_available_uses() {
        Ok(coupon)
    } else {
        Err(CouponError::UsageLimitReached(coupon.id))
    }
}

/// Fails with `AlreadyInactive` if the coupon is inactive. Does not
/// deactivate.
pub fn ensure_not_already_inactive(coupon: Coupon) -> Result<Coupon, CouponError> {
    if coupon.is_inactive() {
        Err(CouponError::AlreadyInactive(coupon.id))
    } else {
        Ok(coupon)
    }
}

pub fn ensure_category_not_present(
    coupon: Coupon,
    category_id: &str,
) -> Result<Coupon, CouponError> {
    if coupon.applies_to_category(category_id) {
        Err(CouponError::ApplicableCategoryAlreadyAdded(category_id.to_string()))
    } else {
        Ok(coupon)
    }
}

pub fn ensure_category_present(coupon: Coupon, category_id: &str) -> Result<Coupon, CouponError> {
    if coupon.applies_to_category(category_id) {
        Ok(coupon)
    } else {
        Err(CouponError::CategoryNotInCoupon(category_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCouponRepository;
    use crate::domain::coupon::fixtures::{active_coupon, valid_draft};
    use crate::domain::coupon::CouponStatus;
    use proptest::prelude::*;

    const REQUIRED: [&str; 4] = ["name", "description", "expirationDate", "code"];

    fn draft_missing(mask: [bool; 4]) -> CouponDraft {
        let mut draft = valid_draft();
        if mask[0] {
            draft.name = None;
        }
        if mask[1] {
            draft.description = Some("  ".to_string());
        }
        if mask[2] {
            draft.expiration_date = None;
        }
        if mask[3] {
            draft.code = None;
        }
        draft
    }

    // Required fields

    #[test]
    fn validate_create_accepts_valid_draft() {
        let draft = valid_draft();
        assert_eq!(validate_create(draft.clone(), Timestamp::now()), Ok(draft));
    }

    #[test]
    fn validate_create_reports_every_missing_field() {
        let result = validate_create(CouponDraft::default(), Timestamp::now());
        assert_eq!(result, Err(CouponError::field_cannot_be_empty(REQUIRED)));
    }

    #[test]
    fn required_fields_are_checked_before_discounts() {
        let draft = CouponDraft {
            name: None,
            discount_value: None,
            discount_percentage: None,
            ..valid_draft()
        };
        assert_eq!(
            validate_create(draft, Timestamp::now()),
            Err(CouponError::field_cannot_be_empty(["name"]))
        );
    }

    // Expiration

    #[test]
    fn validate_create_rejects_expiration_at_now() {
        let now = Timestamp::now();
        let draft = CouponDraft {
            expiration_date: Some(now),
            ..valid_draft()
        };
        assert_eq!(
            validate_create(draft, now),
            Err(CouponError::ExpirationDateLessThanCurrentDate(None))
        );
    }

    #[test]
    fn validate_create_rejects_past_expiration_before_discount_rules() {
        let now = Timestamp::now();
        let draft = CouponDraft {
            expiration_date: Some(now.minus_days(1)),
            discount_value: Some(-1.0),
            ..valid_draft()
        };
        assert!(matches!(
            validate_create(draft, now),
            Err(CouponError::ExpirationDateLessThanCurrentDate(_))
        ));
    }

    #[test]
    fn validate_update_ignores_past_expiration() {
        let draft = CouponDraft {
            expiration_date: Some(Timestamp::now().minus_days(1)),
            ..valid_draft()
        };
        assert!(validate_update(draft).is_ok());
    }

    // Discounts

    #[test]
    fn one_discount_field_is_enough() {
        let draft = CouponDraft {
            discount_value: None,
            ..valid_draft()
        };
        assert!(validate_update(draft).is_ok());

        let draft = CouponDraft {
            discount_percentage: None,
            ..valid_draft()
        };
        assert!(validate_update(draft).is_ok());
    }

    #[test]
    fn zero_discount_is_accepted() {
        let draft = CouponDraft {
            discount_value: Some(0.0),
            discount_percentage: None,
            ..valid_draft()
        };
        assert!(validate_create(draft, Timestamp::now()).is_ok());
    }

    #[test]
    fn negative_value_is_rejected() {
        let draft = CouponDraft {
            discount_value: Some(-0.01),
            ..valid_draft()
        };
        assert_eq!(validate_update(draft), Err(CouponError::DiscountValueLessThanZero));
    }

    #[test]
    fn percentage_is_reported_before_value_when_both_negative() {
        let draft = CouponDraft {
            discount_value: Some(-1.0),
            discount_percentage: Some(-1.0),
            ..valid_draft()
        };
        assert_eq!(
            validate_update(draft),
            Err(CouponError::DiscountPercentageLessThanZero)
        );
    }

    // Id and code

    #[test]
    fn missing_id_is_not_found() {
        assert_eq!(validate_coupon_id(None), Err(CouponError::NotFound(None)));
        let id = CouponId::new();
        assert_eq!(validate_coupon_id(Some(id)), Ok(id));
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let repository = InMemoryCouponRepository::with_coupons(vec![active_coupon()]);
        let draft = valid_draft();

        let result = validate_coupon_code(&repository, draft).await;

        assert_eq!(result, Err(CouponError::code_already_exists("123ABC")));
    }

    #[tokio::test]
    async fn unused_code_passes() {
        let repository = InMemoryCouponRepository::new();
        let draft = valid_draft();

        let result = validate_coupon_code(&repository, draft.clone()).await;

        assert_eq!(result, Ok(draft));
    }

    // Entity checks

    #[test]
    fn expired_coupon_is_rejected() {
        let coupon = active_coupon();
        let id = coupon.id;
        let now = coupon.expiration_date;
        assert_eq!(ensure_not_expired(coupon, now), Err(CouponError::Expired(id)));
    }

    #[test]
    fn coupon_flagged_expired_is_rejected() {
        let mut coupon = active_coupon();
        coupon.status = CouponStatus::Expired;
        assert!(ensure_not_expired(coupon, Timestamp::now()).is_err());
    }

    #[test]
    fn inactive_check_is_idempotent() {
        let mut coupon = active_coupon();
        coupon.deactivate();

        let first = ensure_active(coupon.clone());
        let second = ensure_active(coupon.clone());

        assert_eq!(first, Err(CouponError::Invalid(coupon.id)));
        assert_eq!(first, second);
    }

    #[test]
    fn usage_check_treats_missing_limit_as_unlimited() {
        let mut coupon = active_coupon();
        coupon.use_limit = None;
        assert!(ensure_has_available_uses(coupon.clone()).is_ok());

        coupon.use_limit = Some(0);
        assert_eq!(
            ensure_has_available_uses(coupon.clone()),
            Err(CouponError::UsageLimitReached(coupon.id))
        );
    }

    #[test]
    fn already_inactive_check_passes_active_coupon_through_unchanged() {
        let coupon = active_coupon();
        assert_eq!(ensure_not_already_inactive(coupon.clone()), Ok(coupon));
    }

    #[test]
    fn category_membership_checks() {
        let coupon = active_coupon();

        assert_eq!(
            ensure_category_not_present(coupon.clone(), "category1"),
            Err(CouponError::ApplicableCategoryAlreadyAdded("category1".into()))
        );
        assert!(ensure_category_not_present(coupon.clone(), "category9").is_ok());

        assert!(ensure_category_present(coupon.clone(), "category1").is_ok());
        assert_eq!(
            ensure_category_present(coupon, "category9"),
            Err(CouponError::CategoryNotInCoupon("category9".into()))
        );
    }

    proptest! {
        #[test]
        fn missing_fields_are_reported_exactly(
            mask in prop::array::uniform4(any::<bool>()),
            value in prop::option::of(-10.0f64..10.0),
            percentage in prop::option::of(-10.0f64..10.0),
        ) {
            prop_assume!(mask.iter().any(|missing| *missing));

            let mut draft = draft_missing(mask);
            draft.discount_value = value;
            draft.discount_percentage = percentage;

            let expected: Vec<&str> = REQUIRED
                .iter()
                .zip(mask)
                .filter(|(_, missing)| *missing)
                .map(|(field, _)| *field)
                .collect();

            prop_assert_eq!(
                validate_create(draft, Timestamp::now()),
                Err(CouponError::field_cannot_be_empty(expected))
            );
        }

        #[test]
        fn percentage_below_zero_always_wins(
            value in prop::option::of(-100.0f64..100.0),
            percentage in -100.0f64..-0.001,
        ) {
            let draft = CouponDraft {
                discount_value: value,
                discount_percentage: Some(percentage),
                ..valid_draft()
            };
            prop_assert_eq!(
                validate_update(draft),
                Err(CouponError::DiscountPercentageLessThanZero)
            );
        }

        #[test]
        fn expiration_not_after_now_is_rejected(offset_secs in 0i64..1_000_000) {
            let now = Timestamp::now();
            let draft = CouponDraft {
                expiration_date: Some(now.plus_secs(-offset_secs)),
                ..valid_draft()
            };
            prop_assert_eq!(
                validate_create(draft, now),
                Err(CouponError::ExpirationDateLessThanCurrentDate(None))
            );
        }
    }
}
