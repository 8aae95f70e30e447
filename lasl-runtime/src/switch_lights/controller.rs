//! # Controller
//!
//! 灯光调度的入口：按载具实例 ID 缓存 [`VesselFeature`]，
//! 并根据载具生命周期通知清理缓存。
//!
//! ## 通知处理
//!
//! Controller 在构造时订阅 [`GameEvents`]，每次访问缓存之前先取走积压的通知：
//! `Changed` 和 `Destroyed` 都会丢弃对应载具的包装，下次访问时重新创建并重新枚举零件。
//! Controller 被 drop 时订阅随之释放。

use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

use super::cache::ModuleCache;
use super::events::{GameEvents, Subscription, VesselEvent};
use super::handle::{InstanceId, Part, Vessel};
use super::part::PartFeature;
use super::regime::Regime;
use super::vessel::VesselFeature;
use crate::config::Settings;

static ALL_PARTS: Regime = Regime::ALL_PARTS;

/// 灯光调度器
pub struct Controller {
    settings: Rc<dyn Settings>,
    cache: Rc<ModuleCache>,
    vessels: HashMap<InstanceId, VesselFeature>,
    subscription: Option<Subscription>,
    dummy: PartFeature,
}

impl Controller {
    /// 创建调度器并订阅载具通知
    pub fn new(settings: Rc<dyn Settings>, cache: Rc<ModuleCache>, events: &GameEvents) -> Self {
        let mut controller = Self::detached(settings, cache);
        controller.subscription = Some(events.subscribe());
        controller
    }

    /// 创建不订阅任何通知源的调度器，通知只能通过 [`notify`](Self::notify) 送达
    pub fn detached(settings: Rc<dyn Settings>, cache: Rc<ModuleCache>) -> Self {
        debug!(modules = cache.len(), "创建灯光调度器");
        Self {
            settings,
            cache,
            vessels: HashMap::new(),
            subscription: None,
            dummy: PartFeature::dummy(),
        }
    }

    /// 未指定规则时使用的规则
    pub fn all_parts() -> &'static Regime {
        &ALL_PARTS
    }

    pub fn cache(&self) -> &Rc<ModuleCache> {
        &self.cache
    }

    /// 取载具包装，不存在时创建
    pub fn vessel(&mut self, vessel: &Rc<dyn Vessel>) -> &mut VesselFeature {
        self.pump();
        self.vessel_entry(vessel)
    }

    /// 取零件包装
    ///
    /// 零件不属于任何载具时返回占位包装。
    pub fn part(&mut self, part: &Rc<dyn Part>) -> &PartFeature {
        self.pump();
        let Some(vessel) = part.vessel() else {
            return &self.dummy;
        };
        self.vessel_entry(&vessel).part(part)
    }

    /// 零件上是否有任何已注册的模块
    pub fn supports(&self, part: &dyn Part) -> bool {
        part.modules().iter().any(|m| self.cache.supports(&**m))
    }

    /// 直接处理一条通知
    pub fn notify(&mut self, event: VesselEvent) {
        let id = event.vessel_id();
        if self.vessels.remove(&id).is_some() {
            debug!(vessel = id, ?event, "丢弃载具灯光包装");
        }
    }

    /// 该载具的包装是否已缓存
    pub fn is_cached(&mut self, vessel_id: InstanceId) -> bool {
        self.pump();
        self.vessels.contains_key(&vessel_id)
    }

    /// 已缓存的载具数量
    pub fn len(&mut self) -> usize {
        self.pump();
        self.vessels.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    fn pump(&mut self) {
        let pending = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return,
        };
        for event in pending {
            self.notify(event);
        }
    }

    fn vessel_entry(&mut self, vessel: &Rc<dyn Vessel>) -> &mut VesselFeature {
        self.vessels.entry(vessel.instance_id()).or_insert_with(|| {
            debug!(vessel = %vessel.name(), id = vessel.instance_id(), "创建载具灯光包装");
            VesselFeature::new(
                Rc::clone(&self.settings),
                Rc::clone(&self.cache),
                Rc::clone(vessel),
            )
        })
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("cache", &self.cache)
            .field("vessels", &self.vessels.keys().collect::<Vec<_>>())
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}
