//! Board traversal over arbitrary shapes
//!
//! A recording reader logs when each lookup starts and finishes, with small
//! varying delays so lookups within a level interleave.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;

use organize::backend::boards::resolve_board;
use organize::backend::store::{BoardReader, StoreResult};
use organize::shared::{Board, BoardId, Item, ItemId, List, ListId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    List,
    Item,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Start(Level),
    End(Level),
}

struct RecordingReader {
    board: Board,
    lists: HashMap<ListId, List>,
    items: HashMap<ItemId, Item>,
    seed: u64,
    log: Mutex<Vec<Event>>,
}

impl RecordingReader {
    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }

    fn delay(&self, key: u128) -> Duration {
        Duration::from_millis(((key as u64) ^ self.seed) % 3)
    }
}

#[async_trait]
impl BoardReader for RecordingReader {
    async fn find_board(&self, id: BoardId) -> StoreResult<Option<Board>> {
        Ok((self.board.id == id).then(|| self.board.clone()))
    }

    async fn find_list(&self, id: ListId) -> StoreResult<Option<List>> {
        self.record(Event::Start(Level::List));
        tokio::time::sleep(self.delay(id.as_uuid().as_u128())).await;
        self.record(Event::End(Level::List));
        Ok(self.lists.get(&id).cloned())
    }

    async fn find_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        self.record(Event::Start(Level::Item));
        tokio::time::sleep(self.delay(id.as_uuid().as_u128())).await;
        self.record(Event::End(Level::Item));
        Ok(self.items.get(&id).cloned())
    }
}

/// Board with one list per `shape` entry holding that many items
fn build(shape: &[usize], seed: u64) -> (RecordingReader, UserId, Vec<ItemId>) {
    let owner = UserId::new();
    let mut board = Board::new(owner, "Prop");
    let mut lists = HashMap::new();
    let mut items = HashMap::new();
    let mut expected = Vec::new();

    for (l, count) in shape.iter().enumerate() {
        let mut list = List::new(owner, format!("L{}", l));
        for i in 0..*count {
            let item = Item::new(owner, list.id, format!("I{}-{}", l, i), "");
            list.items.push(item.id);
            expected.push(item.id);
            items.insert(item.id, item);
        }
        board.lists.push(list.id);
        lists.insert(list.id, list);
    }

    let reader = RecordingReader {
        board,
        lists,
        items,
        seed,
        log: Mutex::new(Vec::new()),
    };
    (reader, owner, expected)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_every_item_resolved_in_order(
        shape in prop::collection::vec(0usize..4, 0..5),
        seed in 0u64..1000,
    ) {
        let (reader, owner, expected) = build(&shape, seed);
        let board_id = reader.board.id;

        let aggregate = runtime()
            .block_on(resolve_board(&reader, board_id, owner, Duration::from_secs(5)))
            .unwrap();

        prop_assert_eq!(aggregate.lists.len(), shape.len());
        let ids: Vec<ItemId> = aggregate.items.iter().map(|i| i.id).collect();
        prop_assert_eq!(ids, expected);
        for (list, count) in aggregate.lists.iter().zip(&shape) {
            prop_assert_eq!(list.items.len(), *count);
        }
    }

    #[test]
    fn prop_lists_finish_before_items_start(
        shape in prop::collection::vec(0usize..4, 1..5),
        seed in 0u64..1000,
    ) {
        let (reader, owner, _) = build(&shape, seed);
        let board_id = reader.board.id;

        runtime()
            .block_on(resolve_board(&reader, board_id, owner, Duration::from_secs(5)))
            .unwrap();

        let log = reader.log.lock().unwrap().clone();
        let last_list_end = log
            .iter()
            .rposition(|e| matches!(e, Event::End(Level::List)));
        let first_item_start = log
            .iter()
            .position(|e| matches!(e, Event::Start(Level::Item)));

        let list_lookups = log
            .iter()
            .filter(|e| matches!(e, Event::End(Level::List)))
            .count();
        prop_assert_eq!(list_lookups, shape.len());

        if let (Some(list_end), Some(item_start)) = (last_list_end, first_item_start) {
            prop_assert!(list_end < item_start);
        }

        let item_lookups = log
            .iter()
            .filter(|e| matches!(e, Event::End(Level::Item)))
            .count();
        prop_assert_eq!(item_lookups, shape.iter().sum::<usize>());
    }
}
