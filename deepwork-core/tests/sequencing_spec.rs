mod common;

use common::*;
use deepwork_core::models::*;
use deepwork_core::policy::minutes;
use deepwork_core::usecase::{
    add_time_block, remove_time_block, reorder_time_block, InsertPosition,
};
use deepwork_core::SessionError;
use speculate2::speculate;
use uuid::Uuid;

speculate! {
    before {
        let session = empty_session();
    }

    describe "add_time_block" {
        it "adds a deep work block to an empty session" {
            let block = deep(60);
            let updated = add_time_block(&session, block.clone(), InsertPosition::Append)
                .expect("add should succeed");

            assert_eq!(updated.time_blocks.len(), 1);
            assert_eq!(updated.time_blocks[0], block);
            assert_eq!(updated.total_duration(), minutes(60));
        }

        it "leaves the caller's session untouched" {
            let _ = add_time_block(&session, deep(60), InsertPosition::Append).unwrap();
            assert!(session.time_blocks.is_empty());
        }

        it "rejects a break on an empty session" {
            let result = add_time_block(&session, rest(10), InsertPosition::Append);
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "rejects a break inserted at the front" {
            let session = session_with(vec![deep(60), rest(10), shallow(30)]);
            let result = add_time_block(&session, rest(5), InsertPosition::Before(0));
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "appends a break after a work block" {
            let work = deep(60);
            let pause = rest(10);
            let session = add_time_block(&session, work.clone(), InsertPosition::Append).unwrap();
            let session = add_time_block(&session, pause.clone(), InsertPosition::Append).unwrap();

            assert_eq!(session.time_blocks, vec![work, pause]);
        }

        it "rejects a break appended after another break" {
            let session = session_with(vec![deep(60), rest(10)]);
            let result = add_time_block(&session, rest(10), InsertPosition::Append);
            assert_eq!(result, Err(SessionError::ConsecutiveBlockTypes));
        }

        it "rejects a break inserted directly before a break" {
            let session = session_with(vec![deep(60), rest(10), shallow(30)]);
            let result = add_time_block(&session, rest(5), InsertPosition::Before(1));
            assert_eq!(result, Err(SessionError::ConsecutiveBlockTypes));
        }

        it "rejects a break inserted directly after a break" {
            let session = session_with(vec![deep(60), rest(10), shallow(30)]);
            let result = add_time_block(&session, rest(5), InsertPosition::Before(2));
            assert_eq!(result, Err(SessionError::ConsecutiveBlockTypes));
        }

        it "allows a break between two work blocks" {
            let session = session_with(vec![deep(60), shallow(30)]);
            let updated = add_time_block(&session, rest(5), InsertPosition::Before(1)).unwrap();
            assert_eq!(
                kinds(&updated),
                vec![BlockKind::DeepWork, BlockKind::Break, BlockKind::ShallowWork]
            );
        }

        it "shifts later blocks right when inserting at a position" {
            let first = deep(60);
            let pause = rest(10);
            let inserted = deep(60);
            let session = session_with(vec![first.clone(), pause.clone()]);

            let updated = add_time_block(&session, inserted.clone(), InsertPosition::Before(0)).unwrap();

            assert_eq!(updated.time_blocks, vec![inserted, first, pause]);
        }

        it "rejects a session that already has the maximum number of blocks" {
            let mut blocks = Vec::new();
            for _ in 0..6 {
                blocks.push(deep(25));
                blocks.push(rest(5));
            }
            let session = session_with(blocks);
            assert_eq!(session.time_blocks.len(), MAX_TIME_BLOCKS);

            let result = add_time_block(&session, deep(25), InsertPosition::Append);
            assert_eq!(result, Err(SessionError::MaxTimeBlocksReached));
        }

        it "checks the position before capacity" {
            let mut blocks = Vec::new();
            for _ in 0..6 {
                blocks.push(deep(25));
                blocks.push(rest(5));
            }
            let session = session_with(blocks);

            let result = add_time_block(&session, deep(25), InsertPosition::Before(12));
            assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
        }

        it "rejects a block whose id is already scheduled" {
            let work = deep(60);
            let session = session_with(vec![work.clone(), rest(10), shallow(30)]);

            let result = add_time_block(&session, work, InsertPosition::Append);
            assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
        }

        it "rejects an oversized block instead of overflowing" {
            let session = session_with(vec![deep(60)]);
            let huge = TimeBlock::deep_work(std::time::Duration::MAX, vec![writing()])
                .minted(Uuid::new_v4(), fixed_now());

            let result = add_time_block(&session, huge, InsertPosition::Append);
            assert_eq!(result, Err(SessionError::MaxSessionDurationReached));
        }

        it "does not flag consecutive work when a break separates the blocks" {
            let session = session_with(vec![deep(120), rest(30)]);
            let updated = add_time_block(&session, deep(130), InsertPosition::Append).unwrap();
            assert_eq!(updated.total_duration(), minutes(280));
        }

        it "rejects a block that pushes the session past twelve hours" {
            let session = session_with(vec![
                deep(120), rest(30), deep(120), rest(30),
                deep(120), rest(30), deep(120), rest(30),
            ]);
            assert_eq!(session.total_duration(), minutes(600));

            let result = add_time_block(&session, deep(130), InsertPosition::Append);
            assert_eq!(result, Err(SessionError::MaxSessionDurationReached));
        }

        it "accepts a session total of exactly twelve hours" {
            let session = session_with(vec![
                deep(120), rest(30), deep(120), rest(30),
                deep(120), rest(30), deep(120), rest(30),
            ]);
            let updated = add_time_block(&session, deep(120), InsertPosition::Append).unwrap();
            assert_eq!(updated.total_duration(), MAX_SESSION_DURATION);
        }

        it "rejects work runs longer than two and a half hours" {
            let session = session_with(vec![deep(120)]);
            let result = add_time_block(&session, deep(120), InsertPosition::Append);
            assert_eq!(result, Err(SessionError::MaxConsecutiveDeepWorkDurationReached));
        }

        it "counts deep and shallow work together in a run" {
            let session = session_with(vec![deep(120), rest(10), deep(100)]);
            let result = add_time_block(&session, shallow(60), InsertPosition::Append);
            assert_eq!(result, Err(SessionError::MaxConsecutiveDeepWorkDurationReached));
        }

        it "measures the run the inserted block joins in the middle" {
            let session = session_with(vec![deep(60), rest(10), deep(60), rest(10), deep(30)]);
            let result = add_time_block(&session, deep(100), InsertPosition::Before(2));
            assert_eq!(result, Err(SessionError::MaxConsecutiveDeepWorkDurationReached));

            let updated = add_time_block(&session, shallow(40), InsertPosition::Before(2)).unwrap();
            assert_eq!(updated.time_blocks.len(), 6);
        }

        describe "position bounds" {
            it "accepts the last existing index" {
                let session = session_with(vec![deep(30), rest(10), shallow(20)]);
                let updated = add_time_block(&session, shallow(20), InsertPosition::Before(2)).unwrap();
                assert_eq!(updated.time_blocks.len(), 4);
                assert_eq!(updated.time_blocks[3].kind(), BlockKind::ShallowWork);
            }

            it "rejects an explicit index equal to the length" {
                let session = session_with(vec![deep(30), rest(10)]);
                let result = add_time_block(&session, deep(30), InsertPosition::Before(2));
                assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
            }

            it "rejects index zero on an empty session" {
                let result = add_time_block(&session, deep(30), InsertPosition::Before(0));
                assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
            }

            it "rejects raw positions below the append sentinel" {
                assert_eq!(
                    InsertPosition::from_raw(-2),
                    Err(SessionError::InvalidTimeBlockPosition)
                );
            }
        }
    }

    describe "remove_time_block" {
        it "removes a work block from a multi-block session" {
            let first = deep(60);
            let pause = rest(10);
            let second = shallow(30);
            let third = shallow(20);
            let session = session_with(vec![first.clone(), pause.clone(), second.clone(), third.clone()]);

            let updated = remove_time_block(&session, second.id()).unwrap();

            assert_eq!(updated.time_blocks, vec![first, pause, third]);
            assert_eq!(session.time_blocks.len(), 4);
        }

        it "rejects removing the only work block" {
            let only = deep(60);
            let session = session_with(vec![only.clone()]);
            let result = remove_time_block(&session, only.id());
            assert_eq!(result, Err(SessionError::MinTimeBlocksReached));
        }

        it "removes a break when work blocks remain" {
            let pause = rest(10);
            let session = session_with(vec![deep(60), pause.clone(), shallow(30)]);
            let updated = remove_time_block(&session, pause.id()).unwrap();
            assert_eq!(kinds(&updated), vec![BlockKind::DeepWork, BlockKind::ShallowWork]);
        }

        it "rejects an id that is not in the session" {
            let session = session_with(vec![deep(60), rest(10), shallow(30)]);
            let result = remove_time_block(&session, Uuid::new_v4());
            assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
        }

        it "rejects leaving a break at the front" {
            let first = deep(60);
            let session = session_with(vec![first.clone(), rest(10), shallow(30)]);
            let result = remove_time_block(&session, first.id());
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "rejects leaving a break at the end" {
            let last = shallow(30);
            let session = session_with(vec![deep(60), rest(10), last.clone()]);
            let result = remove_time_block(&session, last.id());
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "removes the middle of three work blocks" {
            let a = deep(30);
            let b = deep(30);
            let c = deep(30);
            let session = session_with(vec![a.clone(), b.clone(), c.clone()]);
            let updated = remove_time_block(&session, b.id()).unwrap();
            assert_eq!(block_ids(&updated), vec![a.id(), c.id()]);
        }

        it "rejects leaving two breaks next to each other" {
            let middle = shallow(30);
            let session = session_with(vec![deep(60), rest(10), middle.clone(), rest(10), deep(60)]);
            let result = remove_time_block(&session, middle.id());
            assert_eq!(result, Err(SessionError::ConsecutiveBlockTypes));
        }

        it "rejects merging two work runs past the limit" {
            let pause = rest(10);
            let session = session_with(vec![deep(120), pause.clone(), deep(60)]);
            let result = remove_time_block(&session, pause.id());
            assert_eq!(result, Err(SessionError::MaxConsecutiveDeepWorkDurationReached));
        }

        it "keeps a break left alone between work blocks" {
            let removed = shallow(20);
            let session = session_with(vec![deep(60), rest(10), removed.clone(), shallow(30)]);
            let updated = remove_time_block(&session, removed.id()).unwrap();
            assert_eq!(
                kinds(&updated),
                vec![BlockKind::DeepWork, BlockKind::Break, BlockKind::ShallowWork]
            );
        }
    }

    describe "reorder_time_block" {
        it "moves a block backwards to the requested slot" {
            let d1 = deep(60);
            let pause = rest(10);
            let s1 = shallow(30);
            let s2 = shallow(30);
            let session = session_with(vec![d1.clone(), pause.clone(), s1.clone(), s2.clone()]);

            let updated = reorder_time_block(&session, s2.id(), 0).unwrap();

            assert_eq!(block_ids(&updated), vec![s2.id(), d1.id(), pause.id(), s1.id()]);
        }

        it "moves a block forwards accounting for the removal shift" {
            let d1 = deep(60);
            let s1 = shallow(30);
            let pause = rest(10);
            let d2 = deep(60);
            let session = session_with(vec![d1.clone(), s1.clone(), pause.clone(), d2.clone()]);

            let updated = reorder_time_block(&session, d1.id(), 2).unwrap();

            assert_eq!(block_ids(&updated), vec![s1.id(), d1.id(), pause.id(), d2.id()]);
        }

        it "returns the same order when moving a block onto itself" {
            let s1 = shallow(30);
            let session = session_with(vec![deep(60), s1.clone(), rest(10), deep(60)]);
            let updated = reorder_time_block(&session, s1.id(), 1).unwrap();
            assert_eq!(updated.time_blocks, session.time_blocks);
        }

        it "moves a break between other work blocks" {
            let pause = rest(10);
            let session = session_with(vec![deep(60), pause.clone(), shallow(20), shallow(20), shallow(20)]);
            let updated = reorder_time_block(&session, pause.id(), 3).unwrap();
            assert_eq!(
                kinds(&updated),
                vec![
                    BlockKind::DeepWork,
                    BlockKind::ShallowWork,
                    BlockKind::Break,
                    BlockKind::ShallowWork,
                    BlockKind::ShallowWork,
                ]
            );
        }

        it "rejects moves that make two breaks adjacent" {
            let s = shallow(30);
            let session = session_with(vec![deep(60), rest(10), s.clone(), rest(10), deep(60)]);
            let result = reorder_time_block(&session, s.id(), 0);
            assert_eq!(result, Err(SessionError::ConsecutiveBlockTypes));
        }

        it "rejects moving a break to the first position" {
            let pause = rest(10);
            let session = session_with(vec![deep(60), pause.clone(), shallow(30)]);
            let result = reorder_time_block(&session, pause.id(), 0);
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "rejects moving a break to the last position" {
            let pause = rest(10);
            let session = session_with(vec![deep(60), pause.clone(), shallow(30)]);
            let result = reorder_time_block(&session, pause.id(), 2);
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "rejects moving a work block off an edge that exposes a break" {
            let first = deep(60);
            let session = session_with(vec![first.clone(), rest(10), shallow(30)]);
            let result = reorder_time_block(&session, first.id(), 2);
            assert_eq!(result, Err(SessionError::InvalidBreakPosition));
        }

        it "rejects moves that build a work run past the limit" {
            let d2 = deep(60);
            let session = session_with(vec![deep(120), rest(10), d2.clone(), shallow(20)]);
            let result = reorder_time_block(&session, d2.id(), 0);
            assert_eq!(result, Err(SessionError::MaxConsecutiveDeepWorkDurationReached));
        }

        it "rejects a target past the last block" {
            let d = deep(60);
            let session = session_with(vec![d.clone(), rest(10), shallow(30)]);
            assert_eq!(
                reorder_time_block(&session, d.id(), 3),
                Err(SessionError::InvalidTimeBlockPosition)
            );
            assert_eq!(
                reorder_time_block(&session, d.id(), 7),
                Err(SessionError::InvalidTimeBlockPosition)
            );
        }

        it "rejects an unknown block id" {
            let session = session_with(vec![deep(60), rest(10), shallow(30)]);
            let result = reorder_time_block(&session, Uuid::new_v4(), 1);
            assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
        }

        it "rejects any target on an empty session" {
            let result = reorder_time_block(&session, Uuid::new_v4(), 0);
            assert_eq!(result, Err(SessionError::InvalidTimeBlockPosition));
        }
    }
}
