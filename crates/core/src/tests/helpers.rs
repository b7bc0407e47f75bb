// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{DriverStore, OrderStore, StoreError};
use std::collections::HashMap;
use steel_track_domain::{
    Breakdown, CycleWindow, DeliveredOrder, DeliveryNumber, Driver, NewDriver, NewOrder, Order,
    OrderRecord, OrderStatus, OrderType, Shift,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-15 10:00:00 UTC)
}

pub fn create_test_new_order(delivery_number: &str, order_date: Date, tons: f64) -> NewOrder {
    NewOrder {
        delivery_number: DeliveryNumber::new(delivery_number).unwrap(),
        delivery_name: String::from("Al Noor Towers"),
        company: String::from("Emirates Steel"),
        site: String::from("Site A"),
        driver_name: None,
        phone_number: None,
        order_date,
        shift: Shift::Morning,
        order_type: OrderType::StraightBar,
        signed_delivery_note: false,
        tons,
        breakdown: Breakdown::default(),
        status: OrderStatus::InProgress,
    }
}

pub fn create_test_new_order_for_driver(
    delivery_number: &str,
    driver_name: &str,
    order_date: Date,
    tons: f64,
) -> NewOrder {
    let mut order: NewOrder = create_test_new_order(delivery_number, order_date, tons);
    order.driver_name = Some(driver_name.to_string());
    order
}

pub fn create_test_new_driver(name: &str) -> NewDriver {
    NewDriver {
        name: name.to_string(),
        phone_number: String::from("+971501234567"),
        is_active: true,
    }
}

/// In-memory order repository with per-operation failure injection.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    pub active: HashMap<String, Order>,
    pub delivered: HashMap<String, DeliveredOrder>,
    pub fail_active_deletes: bool,
    pub fail_delivered_inserts: bool,
    pub fail_scans_for_driver: Option<String>,
}

impl OrderStore for MemoryOrderStore {
    fn insert_active(&mut self, order: &Order) -> Result<(), StoreError> {
        self.active
            .insert(order.delivery_number.value().to_string(), order.clone());
        Ok(())
    }

    fn get_active(&mut self, delivery_number: &DeliveryNumber) -> Result<Option<Order>, StoreError> {
        Ok(self.active.get(delivery_number.value()).cloned())
    }

    fn list_active(&mut self) -> Result<Vec<Order>, StoreError> {
        Ok(self.active.values().cloned().collect())
    }

    fn update_active(&mut self, order: &Order) -> Result<(), StoreError> {
        let key: &str = order.delivery_number.value();
        if !self.active.contains_key(key) {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.active.insert(key.to_string(), order.clone());
        Ok(())
    }

    fn delete_active(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError> {
        if self.fail_active_deletes {
            return Err(StoreError::Backend(String::from(
                "injected active-delete failure",
            )));
        }
        Ok(self.active.remove(delivery_number.value()).is_some())
    }

    fn insert_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError> {
        if self.fail_delivered_inserts {
            return Err(StoreError::Backend(String::from(
                "injected history-insert failure",
            )));
        }
        self.delivered.insert(
            order.order.delivery_number.value().to_string(),
            order.clone(),
        );
        Ok(())
    }

    fn get_delivered(
        &mut self,
        delivery_number: &DeliveryNumber,
    ) -> Result<Option<DeliveredOrder>, StoreError> {
        Ok(self.delivered.get(delivery_number.value()).cloned())
    }

    fn list_delivered(&mut self) -> Result<Vec<DeliveredOrder>, StoreError> {
        Ok(self.delivered.values().cloned().collect())
    }

    fn update_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError> {
        let key: &str = order.order.delivery_number.value();
        if !self.delivered.contains_key(key) {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.delivered.insert(key.to_string(), order.clone());
        Ok(())
    }

    fn delete_delivered(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError> {
        Ok(self.delivered.remove(delivery_number.value()).is_some())
    }

    fn orders_for_driver(
        &mut self,
        driver_name: &str,
        window: CycleWindow,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        if self.fail_scans_for_driver.as_deref() == Some(driver_name) {
            return Err(StoreError::Backend(String::from("injected scan failure")));
        }

        let mut records: Vec<OrderRecord> = Vec::new();
        for order in self.active.values() {
            if order.driver_name.as_deref() == Some(driver_name)
                && window.contains(order.order_date)
            {
                records.push(OrderRecord::Active(order.clone()));
            }
        }
        for delivered in self.delivered.values() {
            if delivered.order.driver_name.as_deref() == Some(driver_name)
                && window.contains(delivered.order.order_date)
            {
                records.push(OrderRecord::Delivered(delivered.clone()));
            }
        }
        records.sort_by(|a, b| b.order_date().cmp(&a.order_date()));
        Ok(records)
    }
}

/// Combined order and roster store for aggregations that need both
/// trait bounds on one value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub orders: MemoryOrderStore,
    pub drivers: MemoryDriverStore,
}

impl OrderStore for MemoryStore {
    fn insert_active(&mut self, order: &Order) -> Result<(), StoreError> {
        self.orders.insert_active(order)
    }

    fn get_active(&mut self, delivery_number: &DeliveryNumber) -> Result<Option<Order>, StoreError> {
        self.orders.get_active(delivery_number)
    }

    fn list_active(&mut self) -> Result<Vec<Order>, StoreError> {
        self.orders.list_active()
    }

    fn update_active(&mut self, order: &Order) -> Result<(), StoreError> {
        self.orders.update_active(order)
    }

    fn delete_active(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError> {
        self.orders.delete_active(delivery_number)
    }

    fn insert_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError> {
        self.orders.insert_delivered(order)
    }

    fn get_delivered(
        &mut self,
        delivery_number: &DeliveryNumber,
    ) -> Result<Option<DeliveredOrder>, StoreError> {
        self.orders.get_delivered(delivery_number)
    }

    fn list_delivered(&mut self) -> Result<Vec<DeliveredOrder>, StoreError> {
        self.orders.list_delivered()
    }

    fn update_delivered(&mut self, order: &DeliveredOrder) -> Result<(), StoreError> {
        self.orders.update_delivered(order)
    }

    fn delete_delivered(&mut self, delivery_number: &DeliveryNumber) -> Result<bool, StoreError> {
        self.orders.delete_delivered(delivery_number)
    }

    fn orders_for_driver(
        &mut self,
        driver_name: &str,
        window: CycleWindow,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        self.orders.orders_for_driver(driver_name, window)
    }
}

impl DriverStore for MemoryStore {
    fn insert_driver(
        &mut self,
        new: &NewDriver,
        now: OffsetDateTime,
    ) -> Result<Driver, StoreError> {
        self.drivers.insert_driver(new, now)
    }

    fn get_driver(&mut self, driver_id: &str) -> Result<Option<Driver>, StoreError> {
        self.drivers.get_driver(driver_id)
    }

    fn list_drivers(&mut self) -> Result<Vec<Driver>, StoreError> {
        self.drivers.list_drivers()
    }

    fn update_driver(&mut self, driver: &Driver) -> Result<(), StoreError> {
        self.drivers.update_driver(driver)
    }

    fn delete_driver(&mut self, driver_id: &str) -> Result<bool, StoreError> {
        self.drivers.delete_driver(driver_id)
    }
}

/// In-memory driver roster with counter-assigned ids.
#[derive(Debug, Default)]
pub struct MemoryDriverStore {
    pub drivers: HashMap<String, Driver>,
    pub fail_listing: bool,
    pub next_id: u32,
}

impl DriverStore for MemoryDriverStore {
    fn insert_driver(
        &mut self,
        new: &NewDriver,
        now: OffsetDateTime,
    ) -> Result<Driver, StoreError> {
        self.next_id += 1;
        let driver: Driver = Driver {
            driver_id: format!("DRV-{}", self.next_id),
            name: new.name.clone(),
            phone_number: new.phone_number.clone(),
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        };
        self.drivers
            .insert(driver.driver_id.clone(), driver.clone());
        Ok(driver)
    }

    fn get_driver(&mut self, driver_id: &str) -> Result<Option<Driver>, StoreError> {
        Ok(self.drivers.get(driver_id).cloned())
    }

    fn list_drivers(&mut self) -> Result<Vec<Driver>, StoreError> {
        if self.fail_listing {
            return Err(StoreError::Backend(String::from(
                "injected roster-listing failure",
            )));
        }
        let mut roster: Vec<Driver> = self.drivers.values().cloned().collect();
        roster.sort_by(|a, b| a.driver_id.cmp(&b.driver_id));
        Ok(roster)
    }

    fn update_driver(&mut self, driver: &Driver) -> Result<(), StoreError> {
        if !self.drivers.contains_key(&driver.driver_id) {
            return Err(StoreError::NotFound(driver.driver_id.clone()));
        }
        self.drivers
            .insert(driver.driver_id.clone(), driver.clone());
        Ok(())
    }

    fn delete_driver(&mut self, driver_id: &str) -> Result<bool, StoreError> {
        Ok(self.drivers.remove(driver_id).is_some())
    }
}
