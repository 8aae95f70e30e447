//! # Events 模块
//!
//! 载具生命周期通知。
//!
//! ## 设计说明
//!
//! 宿主通过 [`GameEvents::fire`] 投递通知，每个订阅者拥有独立的队列；
//! 订阅者在自己方便的时候调用 [`Subscription::drain`] 取走积压的通知。
//! 同一条通知在队列中只保留一份，队列长度不超过不同通知的数量。
//! 投递和消费发生在同一线程，不需要锁。
//!
//! [`Subscription`] 是 RAII 守卫：drop 时自动退订，队列随之释放。

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};
use tracing::trace;

use super::handle::InstanceId;

/// 载具生命周期通知
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VesselEvent {
    /// 载具结构发生变化（分离、对接等），零件列表需要重新枚举
    Changed(InstanceId),
    /// 载具被销毁
    Destroyed(InstanceId),
}

impl VesselEvent {
    pub fn vessel_id(&self) -> InstanceId {
        match self {
            Self::Changed(id) | Self::Destroyed(id) => *id,
        }
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    queues: HashMap<u64, VecDeque<VesselEvent>>,
}

/// 通知源
///
/// 克隆得到的是同一个通知源的另一个句柄。
#[derive(Clone, Default)]
pub struct GameEvents {
    inner: Rc<RefCell<Inner>>,
}

impl GameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅通知
    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.queues.insert(id, VecDeque::new());
        trace!(subscription = id, "订阅载具通知");
        Subscription {
            id,
            source: Rc::downgrade(&self.inner),
        }
    }

    /// 向所有订阅者投递通知
    pub fn fire(&self, event: VesselEvent) {
        let mut inner = self.inner.borrow_mut();
        trace!(?event, subscribers = inner.queues.len(), "投递载具通知");
        for queue in inner.queues.values_mut() {
            if !queue.contains(&event) {
                queue.push_back(event);
            }
        }
    }

    pub fn on_vessel_change(&self, vessel_id: InstanceId) {
        self.fire(VesselEvent::Changed(vessel_id));
    }

    pub fn on_vessel_destroy(&self, vessel_id: InstanceId) {
        self.fire(VesselEvent::Destroyed(vessel_id));
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().queues.len()
    }
}

impl std::fmt::Debug for GameEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// 订阅守卫
///
/// 通知源先于订阅被丢弃时，[`drain`](Self::drain) 返回空。
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    source: Weak<RefCell<Inner>>,
}

impl Subscription {
    /// 取走所有积压的通知（按投递顺序）
    pub fn drain(&self) -> Vec<VesselEvent> {
        let Some(source) = self.source.upgrade() else {
            return Vec::new();
        };
        let mut inner = source.borrow_mut();
        inner
            .queues
            .get_mut(&self.id)
            .map(|q| q.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.borrow_mut().queues.remove(&self.id);
            trace!(subscription = self.id, "退订载具通知");
        }
    }
}
