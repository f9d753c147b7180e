mod common;

use common::*;
use deepwork_core::models::*;
use deepwork_core::policy::minutes;
use deepwork_core::validation::time_block::validate;
use deepwork_core::TimeBlockError;
use speculate2::speculate;
use uuid::Uuid;

speculate! {
    describe "time block validation" {
        it "accepts deep work at both duration bounds" {
            assert!(validate(&TimeBlock::deep_work(minutes(25), vec![writing()])).is_ok());
            assert!(validate(&TimeBlock::deep_work(minutes(120), vec![writing()])).is_ok());
        }

        it "rejects deep work shorter than twenty five minutes" {
            let block = TimeBlock::deep_work(minutes(24), vec![writing()]);
            assert_eq!(validate(&block), Err(TimeBlockError::DurationTooShort(minutes(25))));
        }

        it "rejects shallow work longer than an hour" {
            let block = TimeBlock::shallow_work(minutes(61), vec![email()]);
            assert_eq!(validate(&block), Err(TimeBlockError::DurationTooLong(minutes(60))));
        }

        it "rejects a break shorter than five minutes" {
            let block = TimeBlock::rest(minutes(4));
            assert_eq!(validate(&block), Err(TimeBlockError::DurationTooShort(minutes(5))));
        }

        it "checks duration before categories" {
            let block = TimeBlock::deep_work(minutes(5), vec![]);
            assert_eq!(validate(&block), Err(TimeBlockError::DurationTooShort(minutes(25))));
        }

        it "requires at least one category on work" {
            let block = TimeBlock::deep_work(minutes(60), vec![]);
            assert_eq!(validate(&block), Err(TimeBlockError::InvalidCategoryCount));
        }

        it "allows at most three categories" {
            let mut extra = Category::new("Design", 0xFF11_2233);
            extra.id = Uuid::from_u128(0xC3);
            let mut fourth = Category::new("Ops", 0xFF44_5566);
            fourth.id = Uuid::from_u128(0xC4);

            let three = TimeBlock::deep_work(minutes(60), vec![writing(), email(), extra.clone()]);
            assert!(validate(&three).is_ok());

            let four = TimeBlock::deep_work(minutes(60), vec![writing(), email(), extra, fourth]);
            assert_eq!(validate(&four), Err(TimeBlockError::InvalidCategoryCount));
        }

        it "rejects duplicate categories" {
            let block = TimeBlock::shallow_work(minutes(30), vec![email(), email()]);
            assert_eq!(validate(&block), Err(TimeBlockError::DuplicateCategories));
        }

        it "never checks categories on a break" {
            assert!(validate(&TimeBlock::rest(minutes(15))).is_ok());
        }

        it "applies the same rules to templates" {
            let template = TimeBlockTemplate::new(BlockKind::ShallowWork, minutes(9), vec![email()]);
            assert_eq!(validate(&template), Err(TimeBlockError::DurationTooShort(minutes(10))));

            let template = TimeBlockTemplate::new(BlockKind::DeepWork, minutes(60), vec![]);
            assert_eq!(validate(&template), Err(TimeBlockError::InvalidCategoryCount));
        }
    }

    describe "CreateTimeBlock" {
        before {
            let create = deepwork_core::usecase::CreateTimeBlock::new(ids(), clock());
        }

        it "mints a valid block with a fresh id and timestamps" {
            let block = create
                .execute(&TimeBlock::deep_work(minutes(60), vec![writing()]))
                .unwrap();

            assert_eq!(block.id(), Uuid::from_u128(1));
            assert_eq!(block.created_at(), fixed_now());
            assert_eq!(block.status(), BlockStatus::NotStarted);
        }

        it "gives every block its own id" {
            let first = create.execute(&TimeBlock::rest(minutes(10))).unwrap();
            let second = create.execute(&TimeBlock::rest(minutes(10))).unwrap();
            assert_ne!(first.id(), second.id());
        }

        it "does not mint an invalid block" {
            let result = create.execute(&TimeBlock::rest(minutes(90)));
            assert_eq!(result, Err(TimeBlockError::DurationTooLong(minutes(60))));
        }

        it "mints templates" {
            let template = TimeBlockTemplate::new(BlockKind::Break, minutes(10), vec![writing()]);
            let minted = create.execute_template(&template).unwrap();

            assert_eq!(minted.id, Uuid::from_u128(1));
            assert!(minted.categories.is_empty());
        }
    }
}
